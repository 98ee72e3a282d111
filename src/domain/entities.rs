//! Domain entities exchanged between the API, services and repositories.
//!
//! Relationship fields hold the related entity one level deep: a Course
//! carries its Student, but that Student's own School is left unloaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::DomainError;

/// Common view over every persisted entity.
pub trait Identified {
    /// Name used in error payloads and alert headers.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Option<i64>;
}

/// Identifier-based equality.
///
/// Two entities are equal when both carry the same identifier. Entities
/// without an identifier are only equal to themselves (same reference),
/// never to another unsaved instance.
macro_rules! identity_by_id {
    ($ty:ty, $name:literal) => {
        impl Identified for $ty {
            const ENTITY_NAME: &'static str = $name;

            fn id(&self) -> Option<i64> {
                self.id
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                if std::ptr::eq(self, other) {
                    return true;
                }
                match (self.id, other.id) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Option<i64>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
}

identity_by_id!(Location, "location");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Option<i64>,
    pub school_name: Option<String>,
    pub location: Option<Location>,
    /// Reverse side of `Student.school`. Filled on reads, ignored on save.
    #[serde(default)]
    pub students: Vec<Student>,
}

identity_by_id!(School, "school");

impl School {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            school_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// The name is mandatory and must not be blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.school_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(DomainError::validation(
                Self::ENTITY_NAME,
                "schoolnamerequired",
                "A school must have a non-empty name",
            )),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub school: Option<School>,
}

identity_by_id!(Student, "student");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}

identity_by_id!(Task, "task");

/// A course owns both its Student reference and the Course-Task join rows.
///
/// `min_salary <= max_salary` is expected but not checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Option<i64>,
    pub course_title: Option<String>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
    pub student: Option<Student>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

identity_by_id!(Course, "course");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    French,
    English,
    Spanish,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::French => "FRENCH",
            Language::English => "ENGLISH",
            Language::Spanish => "SPANISH",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FRENCH" => Ok(Language::French),
            "ENGLISH" => Ok(Language::English),
            "SPANISH" => Ok(Language::Spanish),
            other => Err(DomainError::Storage(format!(
                "unknown language code '{}'",
                other
            ))),
        }
    }
}

/// Each of `course`, `school` and `student` may be referenced by at most
/// one history record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseHistory {
    pub id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub language: Option<Language>,
    pub course: Option<Course>,
    pub school: Option<School>,
    pub student: Option<Student>,
}

identity_by_id!(CourseHistory, "courseHistory");
