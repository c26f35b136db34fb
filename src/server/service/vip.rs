use crate::server::{
    cache::VipStatusStore,
    error::AppError,
    event::{EventBus, PurchaseEvent},
    model::{
        context::OperationContext,
        user::UserId,
        vip::{GrantVipRequest, VipStatus},
    },
};

/// VIP membership lookups and admin grant/revoke.
pub struct VipService<'a> {
    vip_store: &'a dyn VipStatusStore,
    events: &'a EventBus,
}

impl<'a> VipService<'a> {
    pub fn new(vip_store: &'a dyn VipStatusStore, events: &'a EventBus) -> Self {
        Self { vip_store, events }
    }

    /// Gets a user's VIP status. A user without a record is simply not VIP.
    pub async fn get_status(
        &self,
        ctx: &OperationContext,
        user_id: UserId,
    ) -> Result<VipStatus, AppError> {
        ctx.checkpoint()?;

        let expires_at = self.vip_store.expires_at(user_id).await?;

        Ok(VipStatus {
            user_id,
            expires_at,
        })
    }

    /// Grants or renews VIP access; re-granting resets the expiry.
    pub async fn grant(
        &self,
        ctx: &OperationContext,
        request: GrantVipRequest,
    ) -> Result<VipStatus, AppError> {
        ctx.checkpoint()?;

        let expires_at = self
            .vip_store
            .grant(request.user_id, request.duration)
            .await?;

        self.events.publish(PurchaseEvent::VipActivated {
            user_id: request.user_id,
            expires_at,
        });

        tracing::info!("Granted VIP to user {} until {}", request.user_id, expires_at);

        Ok(VipStatus {
            user_id: request.user_id,
            expires_at: Some(expires_at),
        })
    }

    /// Revokes VIP access immediately.
    pub async fn revoke(&self, ctx: &OperationContext, user_id: UserId) -> Result<(), AppError> {
        ctx.checkpoint()?;

        self.vip_store.revoke(user_id).await?;

        self.events.publish(PurchaseEvent::VipRevoked { user_id });

        tracing::info!("Revoked VIP for user {}", user_id);

        Ok(())
    }
}
