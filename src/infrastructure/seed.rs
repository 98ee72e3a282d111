//! Demo data, built in memory through the entity graph and then persisted
//! entity by entity.

use chrono::{Duration, Utc};

use crate::domain::{
    Course, CourseHistory, DomainError, EntityGraph, Language, Location, School, Student, Task,
};
use crate::infrastructure::AppState;

pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if !state.schools.find_all().await?.is_empty() {
        tracing::info!("Database already holds schools, skipping demo data");
        return Ok(());
    }

    let location = state
        .location_repo
        .save(Location {
            street_address: Some("1 Lincoln Way".to_owned()),
            postal_code: Some("94110".to_owned()),
            city: Some("San Francisco".to_owned()),
            state_province: Some("CA".to_owned()),
            ..Default::default()
        })
        .await?;

    let mut graph = EntityGraph::new();

    let school = graph.add_school(School {
        location: Some(location),
        ..School::named("Lincoln High")
    });
    let saved = state.schools.save(graph.school(school).clone()).await?;
    graph.set_school_id(school, saved.id);

    let mut students = Vec::new();
    for (first, last) in [("Ada", "Lovelace"), ("Alan", "Turing")] {
        let key = graph.add_student_entity(Student {
            first_name: Some(first.to_owned()),
            last_name: Some(last.to_owned()),
            email: Some(format!("{}.{}@example.org", first, last).to_lowercase()),
            ..Default::default()
        });
        graph.add_student(school, key);
        let saved = state.student_repo.save(graph.student(key)).await?;
        graph.set_student_id(key, saved.id);
        students.push(key);
    }

    let mut tasks = Vec::new();
    for title in ["Grade homework", "Prepare lab", "Office hours"] {
        let key = graph.add_task(Task {
            title: Some(title.to_owned()),
            ..Default::default()
        });
        let saved = state.task_repo.save(graph.task(key).clone()).await?;
        graph.set_task_id(key, saved.id);
        tasks.push(key);
    }

    let mut courses = Vec::new();
    for (i, (title, min, max)) in [("Algebra I", 40_000, 55_000), ("Chemistry", 45_000, 60_000)]
        .into_iter()
        .enumerate()
    {
        let key = graph.add_course(Course {
            course_title: Some(title.to_owned()),
            min_salary: Some(min),
            max_salary: Some(max),
            student: Some(graph.student(students[i])),
            ..Default::default()
        });
        for task in &tasks[i..] {
            graph.link_course_task(key, *task);
        }
        let saved = state.courses.save(graph.course(key)).await?;
        graph.set_course_id(key, saved.id);
        courses.push(key);
    }

    let now = Utc::now();
    state
        .course_histories
        .save(CourseHistory {
            start_date: Some(now - Duration::days(90)),
            end_date: Some(now),
            language: Some(Language::English),
            course: Some(graph.course(courses[0])),
            school: Some(graph.school(school).clone()),
            student: Some(graph.student(students[0])),
            ..Default::default()
        })
        .await?;

    tracing::info!(
        students = students.len(),
        tasks = tasks.len(),
        courses = courses.len(),
        "Demo data seeded"
    );
    Ok(())
}
