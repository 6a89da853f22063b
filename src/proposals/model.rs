//! Proposal data model and wire DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ads::model::AdResponse;
use crate::users::User;

/// Proposal lifecycle status. Any value may be set from any other; the
/// workflow deliberately has no terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
    Canceled,
}

impl FromStr for ProposalStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProposalStatus::Pending),
            "accepted" => Ok(ProposalStatus::Accepted),
            "rejected" => Ok(ProposalStatus::Rejected),
            "canceled" => Ok(ProposalStatus::Canceled),
            _ => Err(()),
        }
    }
}

/// Proposal row as stored. Everything except `status` is immutable after
/// creation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExchangeProposal {
    pub id: i64,
    pub ad_sender_id: i64,
    pub ad_receiver_id: i64,
    pub comment: String,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

/// Create payload.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreateProposalRequest {
    pub ad_sender_id: Option<i64>,
    pub ad_receiver_id: Option<i64>,
    pub comment: Option<String>,
}

/// Status patch. The value arrives untyped and is parsed explicitly so the
/// client gets a validation message naming the legal statuses.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UpdateProposalStatusRequest {
    pub status: Option<String>,
}

/// Response to a status update; only the status is reported back.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalStatusResponse {
    pub status: ProposalStatus,
}

/// Proposal as served, with both listings nested and each listing carrying
/// its owner's public identity.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalResponse {
    pub id: i64,
    pub ad_sender: AdResponse,
    pub ad_receiver: AdResponse,
    pub comment: String,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

/// Query params for the per-user proposal feed.
#[derive(Debug, Default, Deserialize)]
pub struct ProposalListParams {
    pub status: Option<String>,
}

/// Shared SELECT joining a proposal with both listings and their owners.
pub(crate) const PROPOSAL_JOIN_SELECT: &str = "SELECT p.id, p.comment, p.status, p.created_at, \
     s.id AS sender_id, s.user_id AS sender_user_id, su.username AS sender_username, \
     su.email AS sender_email, s.title AS sender_title, s.description AS sender_description, \
     s.image_url AS sender_image_url, s.category AS sender_category, \
     s.condition AS sender_condition, s.created_at AS sender_created_at, \
     s.is_active AS sender_is_active, \
     r.id AS receiver_id, r.user_id AS receiver_user_id, ru.username AS receiver_username, \
     ru.email AS receiver_email, r.title AS receiver_title, r.description AS receiver_description, \
     r.image_url AS receiver_image_url, r.category AS receiver_category, \
     r.condition AS receiver_condition, r.created_at AS receiver_created_at, \
     r.is_active AS receiver_is_active \
     FROM proposals p \
     JOIN ads s ON s.id = p.ad_sender_id \
     JOIN users su ON su.id = s.user_id \
     JOIN ads r ON r.id = p.ad_receiver_id \
     JOIN users ru ON ru.id = r.user_id";

/// Flat row produced by [`PROPOSAL_JOIN_SELECT`].
#[derive(Debug, sqlx::FromRow)]
pub struct ProposalJoinRow {
    pub id: i64,
    pub comment: String,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
    pub sender_id: i64,
    pub sender_user_id: i64,
    pub sender_username: String,
    pub sender_email: String,
    pub sender_title: String,
    pub sender_description: String,
    pub sender_image_url: Option<String>,
    pub sender_category: crate::ads::Category,
    pub sender_condition: crate::ads::Condition,
    pub sender_created_at: DateTime<Utc>,
    pub sender_is_active: bool,
    pub receiver_id: i64,
    pub receiver_user_id: i64,
    pub receiver_username: String,
    pub receiver_email: String,
    pub receiver_title: String,
    pub receiver_description: String,
    pub receiver_image_url: Option<String>,
    pub receiver_category: crate::ads::Category,
    pub receiver_condition: crate::ads::Condition,
    pub receiver_created_at: DateTime<Utc>,
    pub receiver_is_active: bool,
}

impl From<ProposalJoinRow> for ProposalResponse {
    fn from(row: ProposalJoinRow) -> Self {
        ProposalResponse {
            id: row.id,
            ad_sender: AdResponse {
                id: row.sender_id,
                user: User {
                    id: row.sender_user_id,
                    username: row.sender_username,
                    email: row.sender_email,
                },
                title: row.sender_title,
                description: row.sender_description,
                image_url: row.sender_image_url,
                category: row.sender_category,
                condition: row.sender_condition,
                created_at: row.sender_created_at,
                is_active: row.sender_is_active,
            },
            ad_receiver: AdResponse {
                id: row.receiver_id,
                user: User {
                    id: row.receiver_user_id,
                    username: row.receiver_username,
                    email: row.receiver_email,
                },
                title: row.receiver_title,
                description: row.receiver_description,
                image_url: row.receiver_image_url,
                category: row.receiver_category,
                condition: row.receiver_condition,
                created_at: row.receiver_created_at,
                is_active: row.receiver_is_active,
            },
            comment: row.comment,
            status: row.status,
            created_at: row.created_at,
        }
    }
}
