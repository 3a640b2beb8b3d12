use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{error, info, warn};

use super::request_trace::TraceId;
use crate::extractors::current_user::AuthenticatedUserId;

/// Emits one `request_completed` event per request, leveled by status.
///
/// Fields: method, concrete path, matched route pattern, status, duration,
/// trace id, and the caller's user id once an extractor has resolved it.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What the completion event reports about one request.
struct Completion {
    method: String,
    path: String,
    route: Option<String>,
    user_id: Option<String>,
    trace_id: String,
    status: StatusCode,
    duration_us: u64,
}

impl Completion {
    fn emit(&self) {
        let route = self.route.as_deref().unwrap_or("unmatched");
        let user_id = self.user_id.as_deref().unwrap_or("anonymous");
        let status_code = self.status.as_u16();

        if self.status.is_server_error() {
            error!(http.method=%self.method, url.path=%self.path, http.route=%route, user_id=%user_id, http.status_code=%status_code, duration_us=%self.duration_us, trace_id=%self.trace_id, message="request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method=%self.method, url.path=%self.path, http.route=%route, user_id=%user_id, http.status_code=%status_code, duration_us=%self.duration_us, trace_id=%self.trace_id, message="request_completed");
        } else {
            info!(http.method=%self.method, url.path=%self.path, http.route=%route, user_id=%user_id, http.status_code=%status_code, duration_us=%self.duration_us, trace_id=%self.trace_id, message="request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route, user_id) = match &result {
                Ok(res) => {
                    let request = res.request();
                    let user_id = request
                        .extensions()
                        .get::<AuthenticatedUserId>()
                        .map(|id| id.0.to_string());
                    (res.status(), request.match_pattern(), user_id)
                }
                Err(err) => (err.as_response_error().status_code(), None, None),
            };

            Completion {
                method,
                path,
                route,
                user_id,
                trace_id,
                status,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}
