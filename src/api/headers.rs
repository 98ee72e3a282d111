//! Alert, error and pagination response headers

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::domain::Page;

pub const APP_NAME: &str = "abcideaApp";

const ALERT: &str = "x-abcideaapp-alert";
const ERROR: &str = "x-abcideaapp-error";
const PARAMS: &str = "x-abcideaapp-params";
const TOTAL_COUNT: &str = "x-total-count";
const TOTAL_PAGES: &str = "x-total-pages";

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Created,
    Updated,
    Deleted,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Deleted => "deleted",
        }
    }
}

/// Entity name as reported to clients: `courseHistory` becomes
/// `abcideaAppCourseHistory`.
pub fn qualified(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", APP_NAME, first.to_ascii_uppercase(), chars.as_str()),
        None => APP_NAME.to_string(),
    }
}

fn put(headers: &mut HeaderMap, name: &'static str, value: impl AsRef<str>) {
    match HeaderValue::from_str(value.as_ref()) {
        Ok(v) => {
            headers.insert(HeaderName::from_static(name), v);
        }
        Err(e) => tracing::warn!("Dropping header {}: {}", name, e),
    }
}

/// `X-abcideaApp-alert: abcideaApp.abcideaApp<Entity>.<action>` plus the identifier
pub fn alert(action: Action, entity: &str, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(
        &mut headers,
        ALERT,
        format!("{}.{}.{}", APP_NAME, qualified(entity), action.as_str()),
    );
    put(&mut headers, PARAMS, id.to_string());
    headers
}

/// `Location` of a newly created resource
pub fn location(base: &str, id: i64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, "location", format!("{}/{}", base, id));
    headers
}

pub fn error_headers(entity: &str, key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, ERROR, format!("error.{}", key));
    put(&mut headers, PARAMS, qualified(entity));
    headers
}

pub fn total_count(total: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    put(&mut headers, TOTAL_COUNT, total.to_string());
    headers
}

/// Total counts and an RFC 5988 `Link` header with first/prev/next/last.
///
/// `base` may already carry a query string (`/api/courses?eagerload=true`);
/// paging parameters are appended to it.
pub fn pagination<T>(page: &Page<T>, base: &str) -> HeaderMap {
    let mut headers = total_count(page.total_elements);
    let total_pages = page.total_pages();
    put(&mut headers, TOTAL_PAGES, total_pages.to_string());

    let sep = if base.contains('?') { '&' } else { '?' };
    let link = |n: u64, rel: &str| {
        format!("<{}{}page={}&size={}>; rel=\"{}\"", base, sep, n, page.size, rel)
    };
    let mut links = Vec::new();
    if page.number.saturating_add(1) < total_pages {
        links.push(link(page.number + 1, "next"));
    }
    if page.number > 0 {
        links.push(link(page.number - 1, "prev"));
    }
    links.push(link(total_pages.saturating_sub(1), "last"));
    links.push(link(0, "first"));
    put(&mut headers, "link", links.join(","));

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PageRequest;

    #[test]
    fn alert_names_entity_and_action() {
        let headers = alert(Action::Created, "course", 12);
        assert_eq!(headers[ALERT], "abcideaApp.abcideaAppCourse.created");
        assert_eq!(headers[PARAMS], "12");
    }

    #[test]
    fn entity_names_are_prefixed_with_the_app() {
        assert_eq!(qualified("courseHistory"), "abcideaAppCourseHistory");
        assert_eq!(qualified("school"), "abcideaAppSchool");
        assert_eq!(error_headers("task", "idnull")[PARAMS], "abcideaAppTask");
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = Page::new(vec![(); 10], &PageRequest::new(1, 10), 35);
        let headers = pagination(&page, "/api/courses");

        assert_eq!(headers[TOTAL_COUNT], "35");
        assert_eq!(headers[TOTAL_PAGES], "4");
        let link = headers["link"].to_str().unwrap();
        assert!(link.contains("</api/courses?page=2&size=10>; rel=\"next\""));
        assert!(link.contains("</api/courses?page=0&size=10>; rel=\"prev\""));
        assert!(link.contains("</api/courses?page=3&size=10>; rel=\"last\""));
        assert!(link.contains("</api/courses?page=0&size=10>; rel=\"first\""));
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new(vec![(); 5], &PageRequest::new(3, 10), 35);
        let link = pagination(&page, "/api/courses")["link"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(!link.contains("rel=\"next\""));
    }

    #[test]
    fn links_keep_existing_query() {
        let page = Page::new(vec![(); 1], &PageRequest::new(0, 1), 3);
        let link = pagination(&page, "/api/courses?eagerload=true")["link"]
            .to_str()
            .unwrap()
            .to_string();
        assert!(link.contains("</api/courses?eagerload=true&page=1&size=1>; rel=\"next\""));
    }
}
