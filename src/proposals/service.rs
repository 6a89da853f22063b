//! Proposal store and workflow rules.

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::ads::model::{AdOwnerRow, AD_WITH_OWNER_SELECT};
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;
use crate::permissions;

use super::model::{
    CreateProposalRequest, ExchangeProposal, ProposalJoinRow, ProposalListParams,
    ProposalResponse, ProposalStatus, ProposalStatusResponse, UpdateProposalStatusRequest,
    PROPOSAL_JOIN_SELECT,
};

#[derive(Debug, sqlx::FromRow)]
struct ProposalTarget {
    receiver_owner_id: i64,
}

#[derive(Clone)]
pub struct ProposalService {
    db_pool: PgPool,
}

impl ProposalService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a proposal offering the sender listing for the receiver
    /// listing. Checks run in a fixed order: pair uniqueness, then sender
    /// ownership, then receiver availability. Only the receiver side must be
    /// active; an owner may still offer a deactivated listing of their own.
    pub async fn create(
        &self,
        principal: &AuthenticatedUser,
        req: CreateProposalRequest,
    ) -> Result<ProposalResponse, ApiError> {
        let sender_id = req
            .ad_sender_id
            .ok_or_else(|| ApiError::Validation("ad_sender_id is required".to_string()))?;
        let receiver_id = req
            .ad_receiver_id
            .ok_or_else(|| ApiError::Validation("ad_receiver_id is required".to_string()))?;
        let comment = req.comment.unwrap_or_default();

        let pair_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM proposals WHERE ad_sender_id = $1 AND ad_receiver_id = $2)",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.db_pool)
        .await?;
        if pair_taken {
            return Err(ApiError::Validation(
                "a proposal for this listing pair already exists".to_string(),
            ));
        }

        let sender = self.fetch_listing(sender_id, false).await?.ok_or_else(|| {
            ApiError::Validation(format!("sender listing {sender_id} does not exist"))
        })?;
        permissions::ensure_owner(
            principal.id,
            sender.user_id,
            "you can only create proposals from your own listing",
        )?;

        let receiver = self.fetch_listing(receiver_id, true).await?.ok_or_else(|| {
            ApiError::Validation(format!(
                "receiver listing {receiver_id} does not exist or is not active"
            ))
        })?;

        // The pre-check above races with concurrent creates; the unique
        // constraint on (ad_sender_id, ad_receiver_id) stays authoritative.
        let proposal = sqlx::query_as::<_, ExchangeProposal>(
            r#"
            INSERT INTO proposals (ad_sender_id, ad_receiver_id, comment)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(&comment)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ApiError::Conflict(
                "a proposal for this listing pair already exists".to_string(),
            ),
            _ => ApiError::from(e),
        })?;

        tracing::info!(
            proposal_id = proposal.id,
            sender_id,
            receiver_id,
            "proposal created"
        );

        Ok(ProposalResponse {
            id: proposal.id,
            ad_sender: sender.into(),
            ad_receiver: receiver.into(),
            comment: proposal.comment,
            status: proposal.status,
            created_at: proposal.created_at,
        })
    }

    /// Set the proposal status. Only the owner of the receiver listing may
    /// do this; any status value is accepted from any current status.
    pub async fn update_status(
        &self,
        principal: &AuthenticatedUser,
        id: i64,
        req: UpdateProposalStatusRequest,
    ) -> Result<ProposalStatusResponse, ApiError> {
        let target = sqlx::query_as::<_, ProposalTarget>(
            r#"
            SELECT r.user_id AS receiver_owner_id
            FROM proposals p
            JOIN ads r ON r.id = p.ad_receiver_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("proposal {id} not found")))?;

        permissions::ensure_owner(
            principal.id,
            target.receiver_owner_id,
            "only the owner of the receiver listing can update the proposal status",
        )?;

        let raw = req
            .status
            .ok_or_else(|| ApiError::Validation("status is required".to_string()))?;
        let new_status = parse_status(&raw)?;

        let status: ProposalStatus =
            sqlx::query_scalar("UPDATE proposals SET status = $1 WHERE id = $2 RETURNING status")
                .bind(new_status)
                .bind(id)
                .fetch_one(&self.db_pool)
                .await?;

        tracing::info!(proposal_id = id, status = %raw, "proposal status updated");

        Ok(ProposalStatusResponse { status })
    }

    /// Every proposal where the principal owns either side, newest first,
    /// optionally narrowed to one status. Both listings come back populated
    /// in a single query.
    pub async fn list_for_user(
        &self,
        principal: &AuthenticatedUser,
        params: ProposalListParams,
    ) -> Result<Vec<ProposalResponse>, ApiError> {
        let status = params
            .status
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_status(&raw))
            .transpose()?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(PROPOSAL_JOIN_SELECT);
        builder
            .push(" WHERE (s.user_id = ")
            .push_bind(principal.id)
            .push(" OR r.user_id = ")
            .push_bind(principal.id)
            .push(")");
        if let Some(status) = status {
            builder.push(" AND p.status = ").push_bind(status);
        }
        builder.push(" ORDER BY p.created_at DESC");

        let rows = builder
            .build_query_as::<ProposalJoinRow>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(rows.into_iter().map(ProposalResponse::from).collect())
    }

    /// Load one listing joined with its owner, optionally restricted to the
    /// active pool.
    async fn fetch_listing(
        &self,
        id: i64,
        active_only: bool,
    ) -> Result<Option<AdOwnerRow>, ApiError> {
        let sql = if active_only {
            format!("{AD_WITH_OWNER_SELECT} WHERE a.id = $1 AND a.is_active = TRUE")
        } else {
            format!("{AD_WITH_OWNER_SELECT} WHERE a.id = $1")
        };

        Ok(sqlx::query_as::<_, AdOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?)
    }
}

fn parse_status(raw: &str) -> Result<ProposalStatus, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::Validation(format!(
            "unknown status '{raw}'; expected one of pending, accepted, rejected, canceled"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_messages() {
        assert!(parse_status("accepted").is_ok());
        let err = parse_status("approved").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("unknown status 'approved'"));
    }
}
