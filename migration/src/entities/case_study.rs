use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "case_studies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub company: String,
    pub role: String,
    pub duration: String,
    #[sea_orm(column_type = "Text")]
    pub overview: String,
    #[sea_orm(column_type = "Text")]
    pub challenge: String,
    #[sea_orm(column_type = "Text")]
    pub solution: String,
    #[sea_orm(column_type = "Text")]
    pub impact: String,
    pub image_url: Option<String>,
    /// Serialized JSON object with headline metrics
    #[sea_orm(column_type = "Text")]
    pub metrics: String,
    pub featured: bool,
    pub published: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case_study_tag::Entity")]
    CaseStudyTags,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::case_study_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::case_study_tag::Relation::CaseStudy.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
