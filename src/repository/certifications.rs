//! Certification CRUD

use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use tracing::info;

use crate::errors::Result;

use super::Repository;

use migration::entities::certification;

#[derive(Debug, Clone)]
pub struct NewCertification {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub credential_url: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
}

impl Repository {
    pub async fn create_certification(
        &self,
        input: NewCertification,
    ) -> Result<certification::Model> {
        use sea_orm::ActiveValue::Set;

        let model = certification::ActiveModel {
            title: Set(input.title),
            issuer: Set(input.issuer),
            date: Set(input.date),
            credential_url: Set(input.credential_url),
            image_url: Set(input.image_url),
            order_index: Set(input.order_index),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Certification created: {} ({})", model.title, model.id);
        Ok(model)
    }

    /// List certifications by manual order, newest first within a rank
    pub async fn list_certifications(&self) -> Result<Vec<certification::Model>> {
        Ok(certification::Entity::find()
            .order_by_asc(certification::Column::OrderIndex)
            .order_by_desc(certification::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
