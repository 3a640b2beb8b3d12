use actix_web::web;

use crate::auth::user::User;
use crate::extractors::current_user::CurrentAdmin;

async fn me(admin: CurrentAdmin) -> web::Json<User> {
    web::Json(admin.into_inner())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/me", web::get().to(me));
}
