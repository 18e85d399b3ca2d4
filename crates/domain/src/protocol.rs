use serde::Deserialize;
use serde_json::Value;

use crate::models::{Blog, CurrentUser};

// 缺少 success 字段不算失败
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<CurrentUser>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogList {
    #[serde(default)]
    pub blogs: Vec<Blog>,
}

pub fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    body.trim().to_string()
}
