//! Local mirror of the identity provider's public user profile.
//!
//! Rows are refreshed from verified token claims whenever a principal writes,
//! so listing responses can embed the owner without calling out to the
//! provider.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Upsert the mirror row for an authenticated principal.
pub async fn sync_principal(
    pool: &PgPool,
    id: i64,
    username: &str,
    email: &str,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email)
        VALUES ($1, $2, $3)
        ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username, email = EXCLUDED.email
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(email)
    .execute(pool)
    .await?;

    Ok(())
}
