//! User lookup and refresh-token storage
//!
//! Refresh tokens rotate: a successful refresh deletes the presented token
//! and stores its replacement in the same transaction.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;

use crate::errors::Result;

use super::Repository;

use migration::entities::{refresh_token, user};

#[derive(Debug, Clone)]
pub struct StoredRefreshToken {
    pub token: String,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
}

impl Repository {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    pub async fn find_user_by_id(&self, id: i32) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<user::Model> {
        use sea_orm::ActiveValue::Set;

        let model = user::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("User created: {} ({})", model.email, model.role);
        Ok(model)
    }

    pub async fn set_user_password(&self, id: i32, password_hash: &str) -> Result<()> {
        user::Entity::update_many()
            .col_expr(
                user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }

    /// Replace `old_token` (when present) with `new_token` atomically
    pub async fn rotate_refresh_token(
        &self,
        user_id: i32,
        old_token: Option<&str>,
        new_token: &StoredRefreshToken,
    ) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let txn = self.db.begin().await?;

        if let Some(old_token) = old_token {
            refresh_token::Entity::delete_many()
                .filter(refresh_token::Column::Token.eq(old_token))
                .exec(&txn)
                .await?;
        }

        refresh_token::ActiveModel {
            token: Set(new_token.token.clone()),
            user_id: Set(user_id),
            expires_at: Set(new_token.expires_at),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Look up a stored refresh token, ignoring expired rows
    pub async fn find_refresh_token(&self, token: &str) -> Result<Option<StoredRefreshToken>> {
        let row = refresh_token::Entity::find()
            .filter(refresh_token::Column::Token.eq(token))
            .filter(refresh_token::Column::ExpiresAt.gt(chrono::Utc::now()))
            .one(&self.db)
            .await?;

        Ok(row.map(|row| StoredRefreshToken {
            token: row.token,
            user_id: row.user_id,
            expires_at: row.expires_at,
        }))
    }

    /// Drop every stored refresh token for a user (logout everywhere)
    pub async fn delete_refresh_tokens(&self, user_id: i32) -> Result<u64> {
        let result = refresh_token::Entity::delete_many()
            .filter(refresh_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
