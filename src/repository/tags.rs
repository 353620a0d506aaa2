//! Shared tag upsert used by projects, blog posts, and case studies

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::errors::Result;

use migration::entities::tag;

/// Find-or-create each tag name, returning the tag rows in input order
///
/// Blank names are dropped; callers pass user input as-is.
pub(super) async fn upsert_tags<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<Vec<tag::Model>> {
    use sea_orm::ActiveValue::Set;

    let mut tags = Vec::with_capacity(names.len());

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let existing = tag::Entity::find()
            .filter(tag::Column::Name.eq(name))
            .one(conn)
            .await?;

        let model = match existing {
            Some(model) => model,
            None => {
                tag::ActiveModel {
                    name: Set(name.to_string()),
                    ..Default::default()
                }
                .insert(conn)
                .await?
            }
        };

        tags.push(model);
    }

    Ok(tags)
}
