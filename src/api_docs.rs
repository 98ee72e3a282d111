use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::school::create_school,
        api::school::update_school,
        api::school::list_schools,
        api::school::get_school,
        api::school::delete_school,
        api::course::create_course,
        api::course::update_course,
        api::course::list_courses,
        api::course::get_course,
        api::course::delete_course,
        api::course_history::create_course_history,
        api::course_history::update_course_history,
        api::course_history::list_course_histories,
        api::course_history::get_course_history,
        api::course_history::delete_course_history,
    ),
    tags(
        (name = "abcidea", description = "School, course and course history API")
    )
)]
pub struct ApiDoc;
