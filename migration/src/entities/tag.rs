use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_tag::Entity")]
    ProjectTags,
    #[sea_orm(has_many = "super::blog_post_tag::Entity")]
    BlogPostTags,
    #[sea_orm(has_many = "super::case_study_tag::Entity")]
    CaseStudyTags,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        super::project_tag::Relation::Project.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::project_tag::Relation::Tag.def().rev())
    }
}

impl Related<super::blog_post::Entity> for Entity {
    fn to() -> RelationDef {
        super::blog_post_tag::Relation::BlogPost.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::blog_post_tag::Relation::Tag.def().rev())
    }
}

impl Related<super::case_study::Entity> for Entity {
    fn to() -> RelationDef {
        super::case_study_tag::Relation::CaseStudy.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::case_study_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
