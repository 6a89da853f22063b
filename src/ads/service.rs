//! Listing store backed by Postgres.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::permissions;
use crate::users::{self, User};

use super::model::{
    Ad, AdOwnerRow, AdQuery, AdResponse, NewAd, UpdateAdRequest, AD_WITH_OWNER_SELECT,
};
use super::validation;

const NOT_OWNER: &str = "you are not the owner of this listing";

#[derive(Clone)]
pub struct AdService {
    db_pool: PgPool,
}

impl AdService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a listing owned by the principal. The owner's mirror row is
    /// refreshed from the verified claims first so the FK always resolves.
    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        input: NewAd,
    ) -> Result<AdResponse, ApiError> {
        users::sync_principal(
            &self.db_pool,
            principal.id,
            &principal.username,
            &principal.email,
        )
        .await?;

        let ad = sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (user_id, title, description, image_url, category, condition)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(principal.id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.category)
        .bind(input.condition)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(ad_id = ad.id, owner_id = principal.id, "listing created");

        let owner = User {
            id: principal.id,
            username: principal.username.clone(),
            email: principal.email.clone(),
        };
        Ok(AdResponse::from_parts(ad, owner))
    }

    /// Fetch one listing by id. Inactive listings are still served here;
    /// only the index hides them.
    pub async fn get(&self, id: i64) -> Result<AdResponse, ApiError> {
        let sql = format!("{AD_WITH_OWNER_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AdOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("listing {id} not found")))?;

        Ok(row.into())
    }

    async fn fetch_ad(&self, id: i64) -> Result<Ad, ApiError> {
        sqlx::query_as::<_, Ad>("SELECT * FROM ads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("listing {id} not found")))
    }

    /// Apply a partial update. Only the owner may edit, and the merged
    /// result is validated as a whole before anything is written.
    pub async fn update(
        &self,
        principal: &AuthenticatedUser,
        id: i64,
        patch: UpdateAdRequest,
    ) -> Result<AdResponse, ApiError> {
        let current = self.fetch_ad(id).await?;
        permissions::ensure_owner(principal.id, current.user_id, NOT_OWNER)?;

        let merged = validation::validate_update(&current, patch)?;

        sqlx::query(
            r#"
            UPDATE ads
            SET title = $1, description = $2, image_url = $3, category = $4, condition = $5
            WHERE id = $6
            "#,
        )
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.image_url)
        .bind(merged.category)
        .bind(merged.condition)
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        tracing::info!(ad_id = id, "listing updated");
        self.get(id).await
    }

    /// Soft delete: the listing drops out of the index but stays fetchable
    /// by id. Deactivating an already inactive listing succeeds unchanged.
    pub async fn soft_delete(&self, principal: &AuthenticatedUser, id: i64) -> Result<(), ApiError> {
        let current = self.fetch_ad(id).await?;
        permissions::ensure_owner(principal.id, current.user_id, NOT_OWNER)?;

        sqlx::query("UPDATE ads SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        tracing::info!(ad_id = id, "listing deactivated");
        Ok(())
    }

    /// Filtered page over active listings. Returns the total match count and
    /// one page of results; a page past the end is empty, not an error.
    pub async fn list(&self, query: &AdQuery) -> Result<(i64, Vec<AdResponse>), ApiError> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM ads a WHERE a.is_active = TRUE");
        push_filters(&mut count_builder, query);

        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.db_pool)
            .await?;

        let mut list_builder: QueryBuilder<Postgres> = QueryBuilder::new(AD_WITH_OWNER_SELECT);
        list_builder.push(" WHERE a.is_active = TRUE");
        push_filters(&mut list_builder, query);
        list_builder.push(" ORDER BY ").push(query.ordering.sql());
        list_builder.push(" LIMIT ").push_bind(query.page.limit());
        list_builder.push(" OFFSET ").push_bind(query.page.offset());

        let rows = list_builder
            .build_query_as::<AdOwnerRow>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok((count, rows.into_iter().map(AdResponse::from).collect()))
    }
}

fn push_filters(builder: &mut QueryBuilder<Postgres>, query: &AdQuery) {
    if let Some(category) = query.category {
        builder.push(" AND a.category = ").push_bind(category);
    }
    if let Some(condition) = query.condition {
        builder.push(" AND a.condition = ").push_bind(condition);
    }
    if let Some(owner) = query.owner {
        builder.push(" AND a.user_id = ").push_bind(owner);
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
        builder
            .push(" AND (a.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(min_date) = query.min_date {
        builder
            .push(" AND a.created_at >= ")
            .push_bind(day_start(min_date));
    }
    if let Some(max_date) = query.max_date {
        // Inclusive day: everything before the following midnight.
        let end = max_date.succ_opt().unwrap_or(max_date);
        builder.push(" AND a.created_at < ").push_bind(day_start(end));
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Escape LIKE wildcards in user-supplied search text.
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_day_start_is_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(day_start(date).to_rfc3339(), "2026-03-14T00:00:00+00:00");
    }
}
