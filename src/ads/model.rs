//! Listing data model and wire DTOs.
//!
//! Three layers are kept deliberately separate: the storage rows ([`Ad`],
//! [`AdOwnerRow`]), the untyped wire payloads ([`CreateAdRequest`],
//! [`UpdateAdRequest`], [`AdListParams`]) and the validated inputs
//! ([`NewAd`], [`AdQuery`]) produced by [`super::validation`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::pagination::Page;
use crate::users::User;

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ad_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Other,
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "books" => Ok(Category::Books),
            "home" => Ok(Category::Home),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

/// Physical condition of the offered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ad_condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
    Broken,
}

impl FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            "broken" => Ok(Condition::Broken),
            _ => Err(()),
        }
    }
}

/// Listing row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Ad {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Shared SELECT for a listing joined with its owner's mirror row.
pub(crate) const AD_WITH_OWNER_SELECT: &str = "SELECT a.id, a.user_id, a.title, a.description, \
     a.image_url, a.category, a.condition, a.created_at, a.is_active, u.username, u.email \
     FROM ads a JOIN users u ON u.id = a.user_id";

/// Flat row from the ads-to-users join.
#[derive(Debug, sqlx::FromRow)]
pub struct AdOwnerRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub username: String,
    pub email: String,
}

/// Listing as served, with the owner's public identity nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdResponse {
    pub id: i64,
    pub user: User,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl AdResponse {
    pub fn from_parts(ad: Ad, user: User) -> Self {
        AdResponse {
            id: ad.id,
            user,
            title: ad.title,
            description: ad.description,
            image_url: ad.image_url,
            category: ad.category,
            condition: ad.condition,
            created_at: ad.created_at,
            is_active: ad.is_active,
        }
    }
}

impl From<AdOwnerRow> for AdResponse {
    fn from(row: AdOwnerRow) -> Self {
        AdResponse {
            id: row.id,
            user: User {
                id: row.user_id,
                username: row.username,
                email: row.email,
            },
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            category: row.category,
            condition: row.condition,
            created_at: row.created_at,
            is_active: row.is_active,
        }
    }
}

/// Create payload. Fields arrive untyped so that every problem is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
}

/// Partial-update payload. `image_url` distinguishes an absent field from an
/// explicit null so the image can be cleared.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub category: Option<String>,
    pub condition: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Fully validated listing content, used both for inserts and as the merged
/// state of a partial update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAd {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub condition: Condition,
}

/// Raw query string of the listing index. Everything is optional and
/// untyped; `validation::validate_list_params` produces the [`AdQuery`].
#[derive(Debug, Default, Deserialize)]
pub struct AdListParams {
    pub category: Option<String>,
    pub condition: Option<String>,
    pub user: Option<String>,
    pub search: Option<String>,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Sort orders accepted by the listing index. Unknown values fall back to
/// newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdOrdering {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    TitleAsc,
    TitleDesc,
}

impl AdOrdering {
    /// Parse the `ordering` parameter, `-` prefix meaning descending.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("created_at") => AdOrdering::CreatedAtAsc,
            Some("-created_at") => AdOrdering::CreatedAtDesc,
            Some("title") => AdOrdering::TitleAsc,
            Some("-title") => AdOrdering::TitleDesc,
            _ => AdOrdering::default(),
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            AdOrdering::CreatedAtDesc => "a.created_at DESC",
            AdOrdering::CreatedAtAsc => "a.created_at ASC",
            AdOrdering::TitleAsc => "a.title ASC",
            AdOrdering::TitleDesc => "a.title DESC",
        }
    }
}

/// Validated listing query.
#[derive(Debug, Clone)]
pub struct AdQuery {
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub owner: Option<i64>,
    pub search: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub ordering: AdOrdering,
    pub page: Page,
}
