use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "certifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub issuer: String,
    /// Display date, stored as the submitted string
    pub date: String,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    /// Manual sort key; the listing orders by this ascending, then recency
    pub order_index: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
