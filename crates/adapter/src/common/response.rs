use domain::protocol::Ack;

use crate::ApiError;

// 只有显式 success: false 才算失败
pub fn check_ack(body: &str, fallback: &str) -> Result<(), ApiError> {
    match serde_json::from_str::<Ack>(body) {
        Ok(ack) if ack.is_rejected() => Err(rejected(ack, fallback)),
        _ => Ok(()),
    }
}

pub fn require_ack(body: &str, fallback: &str) -> Result<(), ApiError> {
    let ack = serde_json::from_str::<Ack>(body).unwrap_or_default();
    if ack.success == Some(true) {
        return Ok(());
    }
    Err(rejected(ack, fallback))
}

fn rejected(ack: Ack, fallback: &str) -> ApiError {
    ApiError::Rejected(
        ack.error
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
    )
}
