use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub views: i64,
    pub read_time: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog_post_tag::Entity")]
    BlogPostTags,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::blog_post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::blog_post_tag::Relation::BlogPost.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
