use abcidea::config::Config;
use abcidea::db;
use abcidea::domain::{
    Course, CourseRepository, DomainError, EntityGraph, PageRequest, School, SchoolRepository,
    Sort, Student, StudentRepository, Task, TaskRepository,
};
use abcidea::infrastructure::{
    AppState, SeaOrmCourseRepository, SeaOrmSchoolRepository, SeaOrmStudentRepository,
    SeaOrmTaskRepository,
};
use abcidea::seed;
use sea_orm::DatabaseConnection;

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn task(title: &str) -> Task {
    Task {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_save_assigns_id_and_round_trips() {
    let db = setup_test_db().await;
    let schools = SeaOrmSchoolRepository::new(db.clone());

    let saved = schools.save(School::named("Lincoln High")).await.unwrap();
    let id = saved.id.expect("id assigned");

    let found = schools.find_by_id(id).await.unwrap().expect("school exists");
    assert_eq!(found, saved);
    assert_eq!(found.school_name.as_deref(), Some("Lincoln High"));

    // A fresh unsaved entity never equals a stored one
    assert_ne!(School::named("Lincoln High"), found);
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let db = setup_test_db().await;
    let tasks = SeaOrmTaskRepository::new(db);

    let err = tasks
        .save(Task {
            id: Some(404),
            ..task("ghost")
        })
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}

#[tokio::test]
async fn test_linked_graph_persists_through_owning_side() {
    let db = setup_test_db().await;
    let tasks = SeaOrmTaskRepository::new(db.clone());
    let courses = SeaOrmCourseRepository::new(db.clone());

    let mut graph = EntityGraph::new();
    let c = graph.add_course(Course {
        course_title: Some("Chemistry".to_string()),
        ..Default::default()
    });
    let grading = graph.add_task(task("Grading"));
    let lab = graph.add_task(task("Lab prep"));

    for key in [grading, lab] {
        let saved = tasks.save(graph.task(key).clone()).await.unwrap();
        graph.set_task_id(key, saved.id);
        graph.link_course_task(c, key);
    }
    graph.link_course_task(c, lab);

    let saved = courses.save(graph.course(c)).await.unwrap();
    graph.set_course_id(c, saved.id);
    let id = saved.id.unwrap();

    let eager = courses.find_one_with_tasks(id).await.unwrap().unwrap();
    assert_eq!(eager.tasks.len(), 2);
    assert!(eager.tasks.contains(graph.task(grading)));

    let lazy = courses.find_by_id(id).await.unwrap().unwrap();
    assert!(lazy.tasks.is_empty());

    let lab_id = graph.task(lab).id.unwrap();
    let owners = courses.find_by_task(lab_id).await.unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, Some(id));

    // Unlink in memory, then persist the owning side once more
    graph.unlink_course_task(c, lab);
    courses.save(graph.course(c)).await.unwrap();
    assert!(courses.find_by_task(lab_id).await.unwrap().is_empty());
    assert_eq!(
        courses.find_one_with_tasks(id).await.unwrap().unwrap().tasks.len(),
        1
    );
}

#[tokio::test]
async fn test_task_save_leaves_join_rows_alone() {
    let db = setup_test_db().await;
    let tasks = SeaOrmTaskRepository::new(db.clone());
    let courses = SeaOrmCourseRepository::new(db.clone());

    let grading = tasks.save(task("Grading")).await.unwrap();
    let course = courses
        .save(Course {
            course_title: Some("Biology".to_string()),
            tasks: vec![grading.clone()],
            ..Default::default()
        })
        .await
        .unwrap();

    tasks
        .save(Task {
            title: Some("Grading v2".to_string()),
            ..grading
        })
        .await
        .unwrap();

    let reloaded = courses
        .find_one_with_tasks(course.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.tasks.len(), 1);
    assert_eq!(reloaded.tasks[0].title.as_deref(), Some("Grading v2"));
}

#[tokio::test]
async fn test_delete_course_removes_links_and_is_idempotent() {
    let db = setup_test_db().await;
    let tasks = SeaOrmTaskRepository::new(db.clone());
    let courses = SeaOrmCourseRepository::new(db.clone());

    let t = tasks.save(task("Grading")).await.unwrap();
    let course = courses
        .save(Course {
            tasks: vec![t.clone()],
            ..Default::default()
        })
        .await
        .unwrap();
    let id = course.id.unwrap();

    courses.delete_by_id(id).await.unwrap();
    courses.delete_by_id(id).await.unwrap();

    assert!(courses.find_by_id(id).await.unwrap().is_none());
    assert!(courses.find_by_task(t.id.unwrap()).await.unwrap().is_empty());
    // The task itself survives
    assert!(tasks.find_by_id(t.id.unwrap()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_students_by_school() {
    let db = setup_test_db().await;
    let schools = SeaOrmSchoolRepository::new(db.clone());
    let students = SeaOrmStudentRepository::new(db.clone());

    let lincoln = schools.save(School::named("Lincoln High")).await.unwrap();
    let other = schools.save(School::named("Other")).await.unwrap();

    for (name, school) in [("Ada", &lincoln), ("Alan", &lincoln), ("Grace", &other)] {
        students
            .save(Student {
                first_name: Some(name.to_string()),
                school: Some(school.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let enrolled = students.find_by_school(lincoln.id.unwrap()).await.unwrap();
    let names: Vec<_> = enrolled
        .iter()
        .filter_map(|s| s.first_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Ada", "Alan"]);
    assert_eq!(enrolled[0].school.as_ref(), Some(&lincoln));

    let page = students
        .find_all(&PageRequest::new(0, 2).with_sort(Sort::desc("firstName")))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(page.content[0].first_name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_unknown_sort_property_is_rejected() {
    let db = setup_test_db().await;
    let courses = SeaOrmCourseRepository::new(db);

    let err = courses
        .find_all(&PageRequest::default().with_sort(Sort::asc("secret")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            key: "sortinvalid",
            ..
        }
    ));
}

#[tokio::test]
async fn test_seed_demo_data_runs_once() {
    let state = AppState::new(setup_test_db().await, &Config::default());

    seed::seed_demo_data(&state).await.unwrap();
    seed::seed_demo_data(&state).await.unwrap();

    let schools = state.schools.find_all().await.unwrap();
    assert_eq!(schools.len(), 1);
    assert!(schools[0].location.is_some());

    let courses = state
        .courses
        .find_all_with_tasks(&PageRequest::default())
        .await
        .unwrap();
    assert_eq!(courses.total_elements, 2);
    assert_eq!(courses.content[0].tasks.len(), 3);
    assert_eq!(courses.content[1].tasks.len(), 2);
    assert!(courses.content[0].student.is_some());
}

#[tokio::test]
async fn test_school_location_is_loaded_one_level_deep() {
    use abcidea::domain::{Location, LocationRepository};
    use abcidea::infrastructure::SeaOrmLocationRepository;

    let db = setup_test_db().await;
    let locations = SeaOrmLocationRepository::new(db.clone());
    let schools = SeaOrmSchoolRepository::new(db.clone());

    let location = locations
        .save(Location {
            city: Some("Springfield".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let school = schools
        .save(School {
            location: Some(location.clone()),
            ..School::named("Lincoln High")
        })
        .await
        .unwrap();

    let found = schools.find_by_id(school.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(
        found.location.and_then(|l| l.city),
        Some("Springfield".to_string())
    );

    // An unsaved location cannot be referenced
    let err = schools
        .save(School {
            location: Some(Location::default()),
            ..School::named("Nowhere")
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            key: "relationunsaved",
            ..
        }
    ));

    let id = location.id.unwrap();
    schools.delete_by_id(school.id.unwrap()).await.unwrap();
    locations.delete_by_id(id).await.unwrap();
    assert!(locations.find_by_id(id).await.unwrap().is_none());
}
