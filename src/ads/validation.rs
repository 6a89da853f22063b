//! Pure validation for listing input.
//!
//! Limits are counted in characters, not bytes, so non-ASCII titles are
//! measured the way users see them. These functions never touch the
//! database; the services apply them before writing.

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::pagination::Page;

use super::model::{
    Ad, AdListParams, AdOrdering, AdQuery, Category, Condition, CreateAdRequest, NewAd,
    UpdateAdRequest,
};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MIN_CHARS: usize = 20;

fn check_title(title: &str) -> Result<(), ApiError> {
    let length = title.chars().count();
    if length < TITLE_MIN_CHARS {
        return Err(ApiError::Validation(format!(
            "title must be at least {TITLE_MIN_CHARS} characters"
        )));
    }
    if length > TITLE_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_description(description: &str) -> Result<(), ApiError> {
    if description.chars().count() < DESCRIPTION_MIN_CHARS {
        return Err(ApiError::Validation(format!(
            "description must be at least {DESCRIPTION_MIN_CHARS} characters"
        )));
    }
    Ok(())
}

fn parse_category(value: &str) -> Result<Category, ApiError> {
    value.parse().map_err(|_| {
        ApiError::Validation(format!(
            "unknown category '{value}'; expected one of electronics, clothing, books, home, other"
        ))
    })
}

fn parse_condition(value: &str) -> Result<Condition, ApiError> {
    value.parse().map_err(|_| {
        ApiError::Validation(format!(
            "unknown condition '{value}'; expected one of new, used, broken"
        ))
    })
}

/// Validate a create payload into insertable listing content.
pub fn validate_new(req: CreateAdRequest) -> Result<NewAd, ApiError> {
    let title = req
        .title
        .ok_or_else(|| ApiError::Validation("title is required".to_string()))?;
    check_title(&title)?;

    let description = req
        .description
        .ok_or_else(|| ApiError::Validation("description is required".to_string()))?;
    check_description(&description)?;

    let category = req
        .category
        .ok_or_else(|| ApiError::Validation("category is required".to_string()))?;
    let category = parse_category(&category)?;

    let condition = req
        .condition
        .ok_or_else(|| ApiError::Validation("condition is required".to_string()))?;
    let condition = parse_condition(&condition)?;

    Ok(NewAd {
        title,
        description,
        image_url: req.image_url,
        category,
        condition,
    })
}

/// Merge a partial update onto the stored listing and validate the result.
/// Fields absent from the patch keep their current value, so a title-only
/// patch is legal even though a bare title would not be a valid create.
pub fn validate_update(current: &Ad, req: UpdateAdRequest) -> Result<NewAd, ApiError> {
    let title = req.title.unwrap_or_else(|| current.title.clone());
    check_title(&title)?;

    let description = req
        .description
        .unwrap_or_else(|| current.description.clone());
    check_description(&description)?;

    let image_url = match req.image_url {
        Some(explicit) => explicit,
        None => current.image_url.clone(),
    };

    let category = match req.category {
        Some(raw) => parse_category(&raw)?,
        None => current.category,
    };

    let condition = match req.condition {
        Some(raw) => parse_condition(&raw)?,
        None => current.condition,
    };

    Ok(NewAd {
        title,
        description,
        image_url,
        category,
        condition,
    })
}

/// Validate the listing index query string. Filter values must parse;
/// paging and ordering are lenient and fall back to defaults.
pub fn validate_list_params(params: AdListParams) -> Result<AdQuery, ApiError> {
    let category = non_empty(params.category)
        .as_deref()
        .map(parse_category)
        .transpose()?;

    let condition = non_empty(params.condition)
        .as_deref()
        .map(parse_condition)
        .transpose()?;

    let owner = non_empty(params.user)
        .map(|raw| {
            raw.trim().parse::<i64>().map_err(|_| {
                ApiError::Validation(format!("user must be a numeric user id, got '{raw}'"))
            })
        })
        .transpose()?;

    let min_date = parse_date(non_empty(params.min_date), "min_date")?;
    let max_date = parse_date(non_empty(params.max_date), "max_date")?;

    let ordering = AdOrdering::parse(non_empty(params.ordering).as_deref());
    let page = Page::resolve(params.page.as_deref(), params.page_size.as_deref());

    Ok(AdQuery {
        category,
        condition,
        owner,
        search: non_empty(params.search),
        min_date,
        max_date,
        ordering,
        page,
    })
}

// Blank query parameters mean "not filtered".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(value: Option<String>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ApiError::Validation(format!("{field} must be a YYYY-MM-DD date")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_request() -> CreateAdRequest {
        CreateAdRequest {
            title: Some("Winter coat".to_string()),
            description: Some("Warm coat, barely worn, size medium".to_string()),
            image_url: None,
            category: Some("clothing".to_string()),
            condition: Some("used".to_string()),
        }
    }

    fn stored_ad() -> Ad {
        Ad {
            id: 1,
            user_id: 10,
            title: "Winter coat".to_string(),
            description: "Warm coat, barely worn, size medium".to_string(),
            image_url: Some("https://img.example/coat.png".to_string()),
            category: Category::Clothing,
            condition: Condition::Used,
            created_at: Utc::now(),
            is_active: true,
        }
    }

    #[test]
    fn test_valid_create_passes() {
        let ad = validate_new(create_request()).unwrap();
        assert_eq!(ad.title, "Winter coat");
        assert_eq!(ad.category, Category::Clothing);
        assert_eq!(ad.condition, Condition::Used);
    }

    #[test]
    fn test_title_length_is_counted_in_characters() {
        // Five Cyrillic characters, ten bytes.
        let mut req = create_request();
        req.title = Some("Кофта".to_string());
        assert!(validate_new(req).is_ok());

        let mut req = create_request();
        req.title = Some("Мика".to_string());
        let err = validate_new(req).unwrap_err();
        assert_eq!(err.to_string(), "title must be at least 5 characters");
    }

    #[test]
    fn test_title_bounds() {
        let mut req = create_request();
        req.title = Some("x".repeat(200));
        assert!(validate_new(req).is_ok());

        let mut req = create_request();
        req.title = Some("x".repeat(201));
        let err = validate_new(req).unwrap_err();
        assert_eq!(err.to_string(), "title must be at most 200 characters");
    }

    #[test]
    fn test_description_minimum() {
        let mut req = create_request();
        req.description = Some("Too short".to_string());
        let err = validate_new(req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "description must be at least 20 characters"
        );

        // Twenty Cyrillic characters pass even though they are forty bytes.
        let mut req = create_request();
        req.description = Some("Отличное состояние!!".to_string());
        assert!(validate_new(req).is_ok());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let err = validate_new(CreateAdRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), "title is required");

        let mut req = create_request();
        req.category = None;
        let err = validate_new(req).unwrap_err();
        assert_eq!(err.to_string(), "category is required");
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        let mut req = create_request();
        req.category = Some("furniture".to_string());
        let err = validate_new(req).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("unknown category 'furniture'"));

        let mut req = create_request();
        req.condition = Some("mint".to_string());
        let err = validate_new(req).unwrap_err();
        assert!(err.to_string().contains("unknown condition 'mint'"));
    }

    #[test]
    fn test_update_merges_missing_fields_from_current() {
        let patch = UpdateAdRequest {
            title: Some("Winter coat, reduced".to_string()),
            ..Default::default()
        };
        let merged = validate_update(&stored_ad(), patch).unwrap();

        assert_eq!(merged.title, "Winter coat, reduced");
        assert_eq!(merged.description, stored_ad().description);
        assert_eq!(merged.image_url, stored_ad().image_url);
        assert_eq!(merged.category, Category::Clothing);
    }

    #[test]
    fn test_update_can_clear_image_url() {
        let patch = UpdateAdRequest {
            image_url: Some(None),
            ..Default::default()
        };
        let merged = validate_update(&stored_ad(), patch).unwrap();
        assert_eq!(merged.image_url, None);
    }

    #[test]
    fn test_update_validates_merged_state() {
        let patch = UpdateAdRequest {
            title: Some("Bag".to_string()),
            ..Default::default()
        };
        let err = validate_update(&stored_ad(), patch).unwrap_err();
        assert_eq!(err.to_string(), "title must be at least 5 characters");
    }

    #[test]
    fn test_list_params_defaults() {
        let query = validate_list_params(AdListParams::default()).unwrap();
        assert_eq!(query.category, None);
        assert_eq!(query.owner, None);
        assert_eq!(query.ordering, AdOrdering::CreatedAtDesc);
        assert_eq!(query.page, Page::default());
    }

    #[test]
    fn test_list_params_blank_values_mean_unfiltered() {
        let params = AdListParams {
            category: Some(String::new()),
            search: Some(String::new()),
            ..Default::default()
        };
        let query = validate_list_params(params).unwrap();
        assert_eq!(query.category, None);
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_list_params_parse_filters() {
        let params = AdListParams {
            category: Some("books".to_string()),
            condition: Some("new".to_string()),
            user: Some("42".to_string()),
            min_date: Some("2026-01-01".to_string()),
            max_date: Some("2026-02-01".to_string()),
            ordering: Some("title".to_string()),
            ..Default::default()
        };
        let query = validate_list_params(params).unwrap();

        assert_eq!(query.category, Some(Category::Books));
        assert_eq!(query.condition, Some(Condition::New));
        assert_eq!(query.owner, Some(42));
        assert_eq!(query.min_date, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(query.max_date, NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(query.ordering, AdOrdering::TitleAsc);
    }

    #[test]
    fn test_list_params_reject_bad_values() {
        let params = AdListParams {
            user: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(validate_list_params(params).is_err());

        let params = AdListParams {
            min_date: Some("01/01/2026".to_string()),
            ..Default::default()
        };
        let err = validate_list_params(params).unwrap_err();
        assert_eq!(err.to_string(), "min_date must be a YYYY-MM-DD date");

        let params = AdListParams {
            category: Some("vehicles".to_string()),
            ..Default::default()
        };
        assert!(validate_list_params(params).is_err());
    }

    #[test]
    fn test_list_params_paging_is_lenient() {
        let params = AdListParams {
            page: Some("bogus".to_string()),
            page_size: Some("1000".to_string()),
            ..Default::default()
        };
        let query = validate_list_params(params).unwrap();
        assert_eq!(query.page.number, 1);
        assert_eq!(query.page.size, 100);
    }
}
