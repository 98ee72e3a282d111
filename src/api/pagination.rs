//! Query-string parsing for list endpoints
//!
//! Parameters arrive as raw pairs so that `sort` may repeat:
//! `?page=0&size=20&sort=courseTitle,desc&sort=id`.

use axum::extract::Query;

use crate::domain::{DEFAULT_PAGE_SIZE, DomainError, PageRequest, Sort};

/// Query string as ordered key/value pairs
pub type QueryPairs = Query<Vec<(String, String)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: PageRequest,
    /// Course only: populate the task set
    pub eagerload: bool,
}

impl ListParams {
    pub fn parse(entity: &'static str, pairs: &[(String, String)]) -> Result<Self, DomainError> {
        let mut page = 0;
        let mut size = DEFAULT_PAGE_SIZE;
        let mut sort = Vec::new();
        let mut eagerload = false;

        for (key, value) in pairs {
            match key.as_str() {
                "page" => page = number(entity, key, value)?,
                "size" => size = number(entity, key, value)?,
                "sort" => sort.push(Sort::parse(value).ok_or_else(|| {
                    DomainError::validation(
                        entity,
                        "sortinvalid",
                        format!("Invalid sort parameter '{}'", value),
                    )
                })?),
                "eagerload" => eagerload = value.eq_ignore_ascii_case("true"),
                _ => {}
            }
        }

        let mut request = PageRequest::new(page, size);
        // The row offset must fit a signed 64-bit OFFSET.
        let offset = request.page.checked_mul(request.size);
        if offset.is_none_or(|o| o > i64::MAX as u64) {
            return Err(DomainError::validation(
                entity,
                "pageinvalid",
                format!("Page {} is out of range", page),
            ));
        }
        request.sort = sort;
        Ok(Self {
            page: request,
            eagerload,
        })
    }
}

fn number(entity: &'static str, key: &str, value: &str) -> Result<u64, DomainError> {
    value.trim().parse().map_err(|_| {
        DomainError::validation(
            entity,
            "pageinvalid",
            format!("Invalid {} parameter '{}'", key, value),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_empty() {
        let params = ListParams::parse("course", &[]).unwrap();
        assert_eq!(params.page, PageRequest::default());
        assert!(!params.eagerload);
    }

    #[test]
    fn repeated_sort_keeps_order() {
        let params = ListParams::parse(
            "course",
            &pairs(&[
                ("page", "2"),
                ("size", "5"),
                ("sort", "courseTitle,desc"),
                ("sort", "id"),
                ("eagerload", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(params.page.page, 2);
        assert_eq!(params.page.size, 5);
        assert_eq!(params.page.sort.len(), 2);
        assert_eq!(params.page.sort[0].direction, Direction::Desc);
        assert_eq!(params.page.sort[1], Sort::asc("id"));
        assert!(params.eagerload);
    }

    #[test]
    fn rejects_garbage() {
        let err = ListParams::parse("course", &pairs(&[("sort", "id,sideways")])).unwrap_err();
        assert!(matches!(err, DomainError::Validation { key: "sortinvalid", .. }));

        let err = ListParams::parse("course", &pairs(&[("page", "-1")])).unwrap_err();
        assert!(matches!(err, DomainError::Validation { key: "pageinvalid", .. }));
    }

    #[test]
    fn page_offset_must_fit_the_database() {
        let err = ListParams::parse("course", &pairs(&[("page", "18446744073709551615")])).unwrap_err();
        assert!(matches!(err, DomainError::Validation { key: "pageinvalid", .. }));

        // 10^18 * 2000 overflows i64 even though the product fits u64
        let err = ListParams::parse(
            "course",
            &pairs(&[("page", "1000000000000000000"), ("size", "2000")]),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation { key: "pageinvalid", .. }));

        // Huge sizes are clamped, not rejected
        let params = ListParams::parse("course", &pairs(&[("page", "3"), ("size", "99999999")])).unwrap();
        assert_eq!(params.page.size, crate::domain::MAX_PAGE_SIZE);
    }
}
