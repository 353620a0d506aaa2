//! Project entity with denormalized view counter

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub featured: bool,
    /// Denormalized counter, incremented atomically with each accepted view
    pub views: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::project_ranking::Entity")]
    Ranking,
    #[sea_orm(has_many = "super::project_view::Entity")]
    Views,
    #[sea_orm(has_many = "super::project_tag::Entity")]
    ProjectTags,
}

impl Related<super::project_ranking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ranking.def()
    }
}

impl Related<super::project_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Views.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_tag::Relation::Project.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
