use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: Option<String>, // RFC 3339
    pub end_date: Option<String>,
    pub language: Option<String>,
    #[sea_orm(unique)]
    pub course_id: Option<i64>,
    #[sea_orm(unique)]
    pub school_id: Option<i64>,
    #[sea_orm(unique)]
    pub student_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::school::Entity",
        from = "Column::SchoolId",
        to = "super::school::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}
