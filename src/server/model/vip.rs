use chrono::{DateTime, Duration, Utc};

use crate::{
    model::vip::{GrantVipDto, VipStatusDto},
    server::{error::AppError, model::user::UserId},
};

/// Grant or renew VIP access for `duration` from now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantVipRequest {
    pub user_id: UserId,
    pub duration: Duration,
}

impl GrantVipRequest {
    /// Validates a grant request.
    ///
    /// # Returns
    /// - `Ok(GrantVipRequest)` - Positive duration
    /// - `Err(AppError::BadRequest)` - Zero or negative duration
    pub fn new(user_id: UserId, duration: Duration) -> Result<Self, AppError> {
        if duration <= Duration::zero() {
            return Err(AppError::BadRequest(
                "VIP duration must be positive".to_string(),
            ));
        }

        Ok(Self { user_id, duration })
    }

    /// Converts the admin payload, validating both the user ID and the duration.
    pub fn from_dto(dto: GrantVipDto) -> Result<Self, AppError> {
        let user_id = UserId::new(dto.user_id)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid user ID {}", dto.user_id)))?;

        let duration = Duration::try_seconds(dto.duration_secs)
            .ok_or_else(|| AppError::BadRequest("VIP duration out of range".to_string()))?;

        Self::new(user_id, duration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipStatus {
    pub user_id: UserId,
    pub expires_at: Option<DateTime<Utc>>,
}

impl VipStatus {
    pub fn is_vip(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn into_dto(self) -> VipStatusDto {
        VipStatusDto {
            user_id: self.user_id.as_i64(),
            is_vip: self.is_vip(),
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_duration() {
        let user_id = UserId::new(1).unwrap();

        assert!(GrantVipRequest::new(user_id, Duration::zero()).is_err());
        assert!(GrantVipRequest::new(user_id, Duration::seconds(-5)).is_err());
        assert!(GrantVipRequest::new(user_id, Duration::days(30)).is_ok());
    }

    #[test]
    fn rejects_invalid_user_in_payload() {
        let result = GrantVipRequest::from_dto(GrantVipDto {
            user_id: 0,
            duration_secs: 60,
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
