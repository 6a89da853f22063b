//! Ownership checks shared by the listing and proposal write paths.

use crate::error::ApiError;

pub fn requester_is_owner(principal_id: i64, owner_id: i64) -> bool {
    principal_id == owner_id
}

/// Rejects with 403 unless the requester owns the entity. `denial` is the
/// client-facing message.
pub fn ensure_owner(principal_id: i64, owner_id: i64, denial: &str) -> Result<(), ApiError> {
    if requester_is_owner(principal_id, owner_id) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(denial.to_string()))
    }
}
