//! Helpers shared by the SeaORM repositories: model conversion, sorting
//! and one-level reference loading.

use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Select};
use std::collections::HashMap;

use crate::domain::{
    Course, CourseHistory, Direction, DomainError, Identified, Language, Location, PageRequest,
    School, Student, Task,
};
use crate::models::{course, course_history, location, school, student, task};

impl From<location::Model> for Location {
    fn from(m: location::Model) -> Self {
        Self {
            id: Some(m.id),
            street_address: m.street_address,
            postal_code: m.postal_code,
            city: m.city,
            state_province: m.state_province,
        }
    }
}

impl From<school::Model> for School {
    fn from(m: school::Model) -> Self {
        Self {
            id: Some(m.id),
            school_name: Some(m.school_name),
            location: None,
            students: Vec::new(),
        }
    }
}

impl From<student::Model> for Student {
    fn from(m: student::Model) -> Self {
        Self {
            id: Some(m.id),
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            school: None,
        }
    }
}

impl From<task::Model> for Task {
    fn from(m: task::Model) -> Self {
        Self {
            id: Some(m.id),
            title: m.title,
            description: m.description,
        }
    }
}

impl From<course::Model> for Course {
    fn from(m: course::Model) -> Self {
        Self {
            id: Some(m.id),
            course_title: m.course_title,
            min_salary: m.min_salary,
            max_salary: m.max_salary,
            student: None,
            tasks: Vec::new(),
        }
    }
}

/// History row without its references; dates and language are decoded.
pub(crate) fn course_history_from_model(
    m: &course_history::Model,
) -> Result<CourseHistory, DomainError> {
    Ok(CourseHistory {
        id: Some(m.id),
        start_date: m.start_date.as_deref().map(parse_timestamp).transpose()?,
        end_date: m.end_date.as_deref().map(parse_timestamp).transpose()?,
        language: m.language.as_deref().map(str::parse::<Language>).transpose()?,
        course: None,
        school: None,
        student: None,
    })
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::Storage(format!("invalid stored timestamp '{}': {}", raw, e)))
}

/// Identifier of a referenced entity. A reference to an entity that was
/// never persisted cannot be stored.
pub(crate) fn reference_id<T: Identified>(
    owner: &'static str,
    reference: Option<&T>,
) -> Result<Option<i64>, DomainError> {
    match reference {
        None => Ok(None),
        Some(r) => r.id().map(Some).ok_or_else(|| {
            DomainError::validation(
                owner,
                "relationunsaved",
                format!("Referenced {} must be saved first", T::ENTITY_NAME),
            )
        }),
    }
}

/// Applies the requested sort, then the identifier as tie-breaker so that
/// unsorted pages come back in insertion order.
pub(crate) fn apply_sort<E, F>(
    mut query: Select<E>,
    page: &PageRequest,
    entity: &'static str,
    id_column: E::Column,
    resolve: F,
) -> Result<Select<E>, DomainError>
where
    E: EntityTrait,
    F: Fn(&str) -> Option<E::Column>,
{
    for sort in &page.sort {
        let column = resolve(sort.property.as_str()).ok_or_else(|| {
            DomainError::validation(
                entity,
                "sortinvalid",
                format!("Cannot sort by '{}'", sort.property),
            )
        })?;
        query = match sort.direction {
            Direction::Asc => query.order_by_asc(column),
            Direction::Desc => query.order_by_desc(column),
        };
    }
    Ok(query.order_by_asc(id_column))
}

pub(crate) async fn locations_by_id<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, Location>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = location::Entity::find()
        .filter(location::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, Location::from(m))).collect())
}

pub(crate) async fn schools_by_id<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, School>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = school::Entity::find()
        .filter(school::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, School::from(m))).collect())
}

pub(crate) async fn students_by_id<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, Student>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = student::Entity::find()
        .filter(student::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, Student::from(m))).collect())
}

/// Students grouped by school, each without its own `school` reference.
pub(crate) async fn students_by_school<C: ConnectionTrait>(
    db: &C,
    school_ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<Student>>, DomainError> {
    let mut out: HashMap<i64, Vec<Student>> = HashMap::new();
    if school_ids.is_empty() {
        return Ok(out);
    }
    let rows = student::Entity::find()
        .filter(student::Column::SchoolId.is_in(school_ids))
        .order_by_asc(student::Column::Id)
        .all(db)
        .await?;
    for m in rows {
        if let Some(school_id) = m.school_id {
            out.entry(school_id).or_default().push(Student::from(m));
        }
    }
    Ok(out)
}

pub(crate) async fn courses_by_id<C: ConnectionTrait>(
    db: &C,
    ids: Vec<i64>,
) -> Result<HashMap<i64, Course>, DomainError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = course::Entity::find()
        .filter(course::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, Course::from(m))).collect())
}

/// Distinct non-null foreign keys, in first-seen order.
pub(crate) fn distinct_ids(ids: impl IntoIterator<Item = Option<i64>>) -> Vec<i64> {
    let mut out: Vec<i64> = Vec::new();
    for id in ids.into_iter().flatten() {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
