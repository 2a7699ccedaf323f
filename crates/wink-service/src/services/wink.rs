//! Wink service
//!
//! Decides whether the current user may wink at someone, records winks, and
//! applies the recipient's decision. The cooldown is checked here for a
//! friendly answer and enforced again by the store's conditional insert.

use tracing::{error, info, instrument, warn};
use validator::Validate;
use wink_core::{CurrentUser, DomainError, Snowflake, Wink, WinkDecision, WinkStatus};

use crate::dto::{ListWinksRequest, SendWinkResponse, WinkResponse, WinkStatusResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const ALREADY_WINKED: &str = "You already winked at this user";

/// Wink service
pub struct WinkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WinkService<'a> {
    /// Create a new WinkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Relationship state from the current user to `recipient_id`
    ///
    /// A store failure is returned as `Lookup`; callers must not treat it as
    /// "no wink yet".
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn check_status(
        &self,
        current_user: &CurrentUser,
        recipient_id: Snowflake,
    ) -> ServiceResult<WinkStatusResponse> {
        if recipient_id.is_zero() {
            return Err(ServiceError::validation("recipient_id is required"));
        }

        let latest = self.find_latest(current_user.id, recipient_id).await?;

        Ok(WinkStatusResponse::from_latest(
            latest.as_ref(),
            self.ctx.cooldown(),
            self.ctx.now(),
        ))
    }

    /// Send a wink from the current user to `recipient_id`
    ///
    /// A send refused by the cooldown, or lost to a concurrent send for the
    /// same pair, returns `success = false` with a message. Store failures
    /// are errors.
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn send(
        &self,
        current_user: &CurrentUser,
        recipient_id: Snowflake,
    ) -> ServiceResult<SendWinkResponse> {
        match self.try_send(current_user, recipient_id).await {
            Ok(wink) => {
                info!(
                    wink_id = %wink.id,
                    sender_id = %wink.sender_id,
                    recipient_id = %wink.recipient_id,
                    "Wink sent"
                );
                Ok(SendWinkResponse::sent(wink.id))
            }
            Err(e) if e.is_already_winked() => {
                warn!(recipient_id = %recipient_id, reason = %e, "Wink refused");
                Ok(SendWinkResponse::refused(e.user_message()))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a pending wink addressed to the current user
    ///
    /// The update only applies while the wink is pending and the caller is its
    /// recipient. Otherwise the wink is re-read to report why.
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn respond(
        &self,
        current_user: &CurrentUser,
        wink_id: Snowflake,
        decision: WinkDecision,
    ) -> ServiceResult<WinkResponse> {
        let updated = self
            .ctx
            .wink_repo()
            .update_status(wink_id, current_user.id, decision.into(), self.ctx.now())
            .await
            .map_err(|e| {
                error!(error = %e, "Wink status update failed");
                ServiceError::respond(e)
            })?;

        match updated {
            Some(wink) => {
                info!(wink_id = %wink.id, status = %wink.status, "Wink resolved");
                Ok(wink.into())
            }
            None => Err(self.explain_unresolved(current_user, wink_id).await),
        }
    }

    /// `respond`, reduced to whether it succeeded
    ///
    /// The failure reason is logged.
    pub async fn respond_ok(
        &self,
        current_user: &CurrentUser,
        wink_id: Snowflake,
        decision: WinkDecision,
    ) -> bool {
        match self.respond(current_user, wink_id, decision).await {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    wink_id = %wink_id,
                    code = e.error_code(),
                    error = %e,
                    "Wink response failed"
                );
                false
            }
        }
    }

    /// Number of pending winks addressed to the current user
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn count_pending(&self, current_user: &CurrentUser) -> ServiceResult<i64> {
        self.ctx
            .wink_repo()
            .count_by_recipient(current_user.id, WinkStatus::Pending)
            .await
            .map_err(|e| {
                error!(error = %e, "Pending wink count failed");
                ServiceError::lookup(e)
            })
    }

    /// Fetch a wink the current user sent or received
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn get_wink(
        &self,
        current_user: &CurrentUser,
        wink_id: Snowflake,
    ) -> ServiceResult<WinkResponse> {
        let wink = self
            .ctx
            .wink_repo()
            .find_by_id(wink_id)
            .await
            .map_err(ServiceError::lookup)?;

        // Other users' winks are reported as missing
        match wink {
            Some(wink) if wink.involves(current_user.id) => Ok(wink.into()),
            _ => Err(ServiceError::not_found("Wink", wink_id.to_string())),
        }
    }

    /// Winks addressed to the current user, newest first
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn list_received(
        &self,
        current_user: &CurrentUser,
        request: ListWinksRequest,
    ) -> ServiceResult<Vec<WinkResponse>> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let winks = self
            .ctx
            .wink_repo()
            .find_by_recipient(current_user.id, request.into())
            .await
            .map_err(ServiceError::lookup)?;

        Ok(winks.into_iter().map(WinkResponse::from).collect())
    }

    /// Winks the current user sent, newest first
    #[instrument(skip(self), fields(user_id = %current_user.id))]
    pub async fn list_sent(
        &self,
        current_user: &CurrentUser,
        request: ListWinksRequest,
    ) -> ServiceResult<Vec<WinkResponse>> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let winks = self
            .ctx
            .wink_repo()
            .find_by_sender(current_user.id, request.into())
            .await
            .map_err(ServiceError::lookup)?;

        Ok(winks.into_iter().map(WinkResponse::from).collect())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn try_send(&self, current_user: &CurrentUser, recipient_id: Snowflake) -> ServiceResult<Wink> {
        if recipient_id.is_zero() {
            return Err(ServiceError::validation("recipient_id is required"));
        }
        if current_user.is(recipient_id) {
            return Err(DomainError::SelfWink.into());
        }

        let policy = self.ctx.cooldown();
        let now = self.ctx.now();

        if let Some(latest) = self.find_latest(current_user.id, recipient_id).await? {
            if !policy.can_send(Some(&latest), now) {
                return Err(self.cooldown_error(&latest));
            }
        }

        let wink = Wink::new(self.ctx.generate_id(), current_user.id, recipient_id, now)?;

        match self.ctx.wink_repo().create(&wink, policy.cutoff(now)).await {
            Ok(()) => Ok(wink),
            Err(DomainError::WinkConflict { .. }) => Err(self.conflict_error(current_user.id, recipient_id).await),
            Err(e) => {
                error!(error = %e, "Wink insert failed");
                Err(ServiceError::send(e))
            }
        }
    }

    async fn find_latest(&self, sender_id: Snowflake, recipient_id: Snowflake) -> ServiceResult<Option<Wink>> {
        self.ctx
            .wink_repo()
            .find_latest(sender_id, recipient_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Wink lookup failed");
                ServiceError::lookup(e)
            })
    }

    fn cooldown_error(&self, latest: &Wink) -> ServiceError {
        ServiceError::Cooldown {
            status: latest.status,
            next_eligible_at: self.ctx.cooldown().next_eligible_at(latest),
        }
    }

    /// The store refused the insert; describe the wink that won if we can see it
    async fn conflict_error(&self, sender_id: Snowflake, recipient_id: Snowflake) -> ServiceError {
        match self.ctx.wink_repo().find_latest(sender_id, recipient_id).await {
            Ok(Some(latest)) => self.cooldown_error(&latest),
            _ => ServiceError::conflict(ALREADY_WINKED),
        }
    }

    async fn explain_unresolved(&self, current_user: &CurrentUser, wink_id: Snowflake) -> ServiceError {
        let wink = match self.ctx.wink_repo().find_by_id(wink_id).await {
            Ok(wink) => wink,
            Err(e) => return ServiceError::respond(e),
        };

        match wink {
            Some(wink) if wink.recipient_id == current_user.id && wink.status.is_terminal() => {
                ServiceError::AlreadyResolved {
                    id: wink.id,
                    status: wink.status,
                }
            }
            Some(wink) if wink.sender_id == current_user.id => {
                ServiceError::permission_denied(DomainError::NotWinkRecipient.to_string())
            }
            Some(wink) if wink.recipient_id == current_user.id => {
                // Still pending yet not updated: the row changed underneath us
                ServiceError::respond(format!("wink {} was not updated", wink.id))
            }
            _ => ServiceError::not_found("Wink", wink_id.to_string()),
        }
    }
}
