use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    create_schema(&db).await?;

    Ok(db)
}

/// Creates every table that does not exist yet. Safe to run on each start.
async fn create_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS location (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            street_address TEXT,
            postal_code TEXT,
            city TEXT,
            state_province TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS school (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            school_name TEXT NOT NULL,
            location_id INTEGER UNIQUE REFERENCES location(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS student (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT,
            last_name TEXT,
            email TEXT,
            school_id INTEGER REFERENCES school(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS task (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            description TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS course (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_title TEXT,
            min_salary INTEGER,
            max_salary INTEGER,
            student_id INTEGER REFERENCES student(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS course_task (
            course_id INTEGER NOT NULL REFERENCES course(id) ON DELETE CASCADE,
            task_id INTEGER NOT NULL REFERENCES task(id),
            PRIMARY KEY (course_id, task_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS course_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_date TEXT,
            end_date TEXT,
            language TEXT,
            course_id INTEGER UNIQUE REFERENCES course(id),
            school_id INTEGER UNIQUE REFERENCES school(id),
            student_id INTEGER UNIQUE REFERENCES student(id)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_student_school ON student(school_id)",
        "CREATE INDEX IF NOT EXISTS idx_course_task_task ON course_task(task_id)",
    ];

    for sql in statements {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            sql.to_owned(),
        ))
        .await?;
    }

    tracing::debug!("Database schema ready");
    Ok(())
}
