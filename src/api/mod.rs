pub mod course;
pub mod course_history;
pub mod errors;
pub mod headers;
pub mod health;
pub mod pagination;
pub mod school;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Schools
        .route(
            "/schools",
            get(school::list_schools)
                .post(school::create_school)
                .put(school::update_school),
        )
        .route(
            "/schools/:id",
            get(school::get_school).delete(school::delete_school),
        )
        // Courses
        .route(
            "/courses",
            get(course::list_courses)
                .post(course::create_course)
                .put(course::update_course),
        )
        .route(
            "/courses/:id",
            get(course::get_course).delete(course::delete_course),
        )
        // Course histories
        .route(
            "/course-histories",
            get(course_history::list_course_histories)
                .post(course_history::create_course_history)
                .put(course_history::update_course_history),
        )
        .route(
            "/course-histories/:id",
            get(course_history::get_course_history)
                .delete(course_history::delete_course_history),
        )
        .with_state(state)
}
