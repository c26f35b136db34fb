use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VipStatusDto {
    pub user_id: i64,
    pub is_vip: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Admin request to grant or renew VIP access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GrantVipDto {
    pub user_id: i64,
    /// Validity from now, in seconds. Must be positive.
    pub duration_secs: i64,
}
