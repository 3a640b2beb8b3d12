use actix_web::web;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extractors::current_user::CurrentUser;

/// A course the user is enrolled in, with their progress through it.
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseWithProgress {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub progress_percentage: u8,
}

/// Courses are not stored yet, so every user has an empty dashboard.
async fn my_courses(current_user: CurrentUser) -> web::Json<Vec<CourseWithProgress>> {
    tracing::info!(
        user_id = %current_user.user_id,
        "dashboard courses requested; course storage not available, returning empty list"
    );
    web::Json(Vec::new())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/my-courses", web::get().to(my_courses));
}
