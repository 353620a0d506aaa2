//! Testimonial CRUD

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::info;

use crate::errors::{PortfolioError, Result};

use super::Repository;

use migration::entities::testimonial;

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub content: String,
    pub avatar_url: Option<String>,
    pub rating: i32,
    pub featured: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTestimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub rating: Option<i32>,
    pub featured: Option<bool>,
}

impl Repository {
    pub async fn create_testimonial(&self, input: NewTestimonial) -> Result<testimonial::Model> {
        use sea_orm::ActiveValue::Set;

        let model = testimonial::ActiveModel {
            name: Set(input.name),
            role: Set(input.role),
            company: Set(input.company),
            content: Set(input.content),
            avatar_url: Set(input.avatar_url),
            rating: Set(input.rating),
            featured: Set(input.featured),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Testimonial created: {} ({})", model.name, model.id);
        Ok(model)
    }

    pub async fn list_testimonials(&self, featured_only: bool) -> Result<Vec<testimonial::Model>> {
        let mut query =
            testimonial::Entity::find().order_by_desc(testimonial::Column::CreatedAt);

        if featured_only {
            query = query.filter(testimonial::Column::Featured.eq(true));
        }

        Ok(query.all(&self.db).await?)
    }

    pub async fn update_testimonial(
        &self,
        id: i32,
        input: UpdateTestimonial,
    ) -> Result<testimonial::Model> {
        use sea_orm::ActiveValue::Set;

        let existing = testimonial::Entity::find_by_id(id).one(&self.db).await?;
        let Some(existing) = existing else {
            return Err(PortfolioError::not_found(format!(
                "testimonial {} does not exist",
                id
            )));
        };

        let mut active: testimonial::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(role) = input.role {
            active.role = Set(role);
        }
        if let Some(company) = input.company {
            active.company = Set(company);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(avatar_url);
        }
        if let Some(rating) = input.rating {
            active.rating = Set(rating);
        }
        if let Some(featured) = input.featured {
            active.featured = Set(featured);
        }
        let model = active.update(&self.db).await?;

        info!("Testimonial updated: {}", id);
        Ok(model)
    }

    pub async fn delete_testimonial(&self, id: i32) -> Result<()> {
        let result = testimonial::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(PortfolioError::not_found(format!(
                "testimonial {} does not exist",
                id
            )));
        }

        info!("Testimonial deleted: {}", id);
        Ok(())
    }
}
