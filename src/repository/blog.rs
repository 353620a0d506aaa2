//! Blog post CRUD

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;

use crate::errors::{PortfolioError, Result};

use super::Repository;
use super::tags::upsert_tags;

use migration::entities::{blog_post, blog_post_tag, tag};

#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub author: String,
    pub published: bool,
    pub read_time: i32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub author: Option<String>,
    pub published: Option<bool>,
    pub read_time: Option<i32>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct BlogPostWithTags {
    pub post: blog_post::Model,
    pub tags: Vec<String>,
}

impl Repository {
    pub async fn create_blog_post(&self, input: NewBlogPost) -> Result<BlogPostWithTags> {
        use sea_orm::ActiveValue::Set;

        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;

        let model = blog_post::ActiveModel {
            title: Set(input.title),
            slug: Set(input.slug),
            excerpt: Set(input.excerpt),
            content: Set(input.content),
            cover_image: Set(input.cover_image),
            author: Set(input.author),
            published: Set(input.published),
            views: Set(0),
            read_time: Set(input.read_time),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let tag_models = upsert_tags(&txn, &input.tags).await?;
        for tag_model in &tag_models {
            blog_post_tag::ActiveModel {
                blog_post_id: Set(model.id),
                tag_id: Set(tag_model.id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!("Blog post created: {}", model.slug);
        Ok(BlogPostWithTags {
            post: model,
            tags: tag_models.into_iter().map(|t| t.name).collect(),
        })
    }

    /// List posts, newest first; `published_only` hides drafts
    pub async fn list_blog_posts(&self, published_only: bool) -> Result<Vec<BlogPostWithTags>> {
        let mut query = blog_post::Entity::find().order_by_desc(blog_post::Column::CreatedAt);

        if published_only {
            query = query.filter(blog_post::Column::Published.eq(true));
        }

        let posts = query.all(&self.db).await?;
        self.with_blog_tags(posts).await
    }

    pub async fn get_blog_post(&self, slug: &str) -> Result<Option<BlogPostWithTags>> {
        let post = blog_post::Entity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;

        let Some(post) = post else {
            return Ok(None);
        };

        Ok(self.with_blog_tags(vec![post]).await?.into_iter().next())
    }

    pub async fn update_blog_post(
        &self,
        slug: &str,
        input: UpdateBlogPost,
    ) -> Result<BlogPostWithTags> {
        use sea_orm::ActiveValue::Set;

        let existing = blog_post::Entity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        let Some(existing) = existing else {
            return Err(PortfolioError::not_found(format!(
                "blog post {} does not exist",
                slug
            )));
        };
        let id = existing.id;

        let txn = self.db.begin().await?;

        let mut active: blog_post::ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(excerpt) = input.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(cover_image) = input.cover_image {
            active.cover_image = Set(cover_image);
        }
        if let Some(author) = input.author {
            active.author = Set(author);
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        if let Some(read_time) = input.read_time {
            active.read_time = Set(read_time);
        }
        active.updated_at = Set(chrono::Utc::now());
        active.update(&txn).await?;

        if let Some(tags) = &input.tags {
            blog_post_tag::Entity::delete_many()
                .filter(blog_post_tag::Column::BlogPostId.eq(id))
                .exec(&txn)
                .await?;

            let tag_models = upsert_tags(&txn, tags).await?;
            for tag_model in &tag_models {
                blog_post_tag::ActiveModel {
                    blog_post_id: Set(id),
                    tag_id: Set(tag_model.id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        info!("Blog post updated: {}", slug);
        self.get_blog_post(slug).await?.ok_or_else(|| {
            PortfolioError::database_operation(format!("blog post {} vanished after update", slug))
        })
    }

    pub async fn delete_blog_post(&self, slug: &str) -> Result<()> {
        let result = blog_post::Entity::delete_many()
            .filter(blog_post::Column::Slug.eq(slug))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(PortfolioError::not_found(format!(
                "blog post {} does not exist",
                slug
            )));
        }

        info!("Blog post deleted: {}", slug);
        Ok(())
    }

    async fn with_blog_tags(&self, posts: Vec<blog_post::Model>) -> Result<Vec<BlogPostWithTags>> {
        let tags = posts
            .load_many_to_many(tag::Entity, blog_post_tag::Entity, &self.db)
            .await?;

        Ok(posts
            .into_iter()
            .zip(tags)
            .map(|(post, tags)| BlogPostWithTags {
                post,
                tags: tags.into_iter().map(|t| t.name).collect(),
            })
            .collect())
    }
}
