use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use uuid::Uuid;

use super::auth_token::AuthToken;
use crate::auth::identity::{require_admin, resolve_user};
use crate::auth::user::User;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

/// Subject of the resolved caller, left in request extensions for the
/// request logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub Uuid);

/// The authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let token = AuthToken::from_request(req, payload).into_inner();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();
        let req = req.clone();

        Box::pin(async move {
            let token = token?;
            let app_state =
                app_state.ok_or_else(|| AppError::internal("AppState not available"))?;

            let user = resolve_user(&token.token, &app_state)
                .await
                .inspect_err(|e| security::token_rejected(e.code().as_str()))?;

            req.extensions_mut()
                .insert(AuthenticatedUserId(user.user_id));
            Ok(CurrentUser(user))
        })
    }
}

/// An authenticated caller whose role is `admin`.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub User);

impl CurrentAdmin {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for CurrentAdmin {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentAdmin {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current_user = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let user = current_user.await?.into_inner();
            let user_id = user.user_id;

            require_admin(user)
                .map(CurrentAdmin)
                .inspect_err(|_| security::admin_denied(user_id))
        })
    }
}
