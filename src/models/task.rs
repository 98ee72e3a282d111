use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_task::Entity")]
    CourseTask,
}

impl Related<super::course_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseTask.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_task::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_task::Relation::Task.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
