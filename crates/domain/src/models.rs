use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// null 和缺省同样处理，一条脏数据不应拖垮整个列表
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// 后端有时把用户 ID 发成字符串，有时发成数字，统一收成字符串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

// 服务端返回的扁平评论记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "rid")]
    pub id: CommentId,
    #[serde(rename = "bid")]
    pub post_id: PostId,
    #[serde(rename = "uid")]
    pub author_id: UserId,
    #[serde(rename = "content", default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(rename = "rbid", default)]
    pub parent_id: Option<CommentId>,
    #[serde(rename = "rtuid", default)]
    pub reply_target_user_id: Option<UserId>,
    #[serde(rename = "replyToUserNickname", default)]
    pub reply_target_nickname: Option<String>,
    #[serde(rename = "userNickname", default, deserialize_with = "null_as_default")]
    pub author_nickname: String,
    #[serde(rename = "create_time", default)]
    pub created_at: Option<String>,
}

impl CommentRecord {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    // 回复对象随父评论一起清掉
    pub fn into_top_level(self) -> Self {
        Self {
            parent_id: None,
            reply_target_user_id: None,
            reply_target_nickname: None,
            ..self
        }
    }

    pub fn reply_label(&self) -> Option<String> {
        self.parent_id?;
        self.reply_target_nickname
            .as_deref()
            .map(|nick| format!("reply to {}:", nick))
    }

    pub fn created_label(&self) -> String {
        format_timestamp(self.created_at.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedComment {
    #[serde(flatten)]
    pub comment: CommentRecord,
    pub replies: Vec<CommentRecord>,
}

impl GroupedComment {
    pub fn new(comment: CommentRecord) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    pub fn find(&self, id: CommentId) -> Option<&CommentRecord> {
        if self.comment.id == id {
            return Some(&self.comment);
        }
        self.replies.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogAuthor {
    pub uid: UserId,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(rename = "bid")]
    pub id: PostId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(rename = "num_view", default, deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(rename = "create_time", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub author: Option<BlogAuthor>,
}

impl Blog {
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.nickname.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn created_label(&self) -> String {
        format_timestamp(self.created_at.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPage {
    #[serde(default)]
    pub blogs: Vec<Blog>,
    #[serde(rename = "totalBlogs", default)]
    pub total_blogs: u64,
}

impl BlogPage {
    pub fn total_pages(&self, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        self.total_blogs.div_ceil(u64::from(limit))
    }
}

/// 登录后缓存在本地的用户对象
///
/// `date_birth` 和 `birthday` 在后端的不同接口里都出现过，无法确认是改名遗留
/// 还是两个独立字段，这里两个都保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    // 其余字段原样保留，写回缓存时不丢
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            token: None,
            date_birth: None,
            birthday: None,
            extra: Map::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserInfo {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_birth: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

impl UserInfo {
    // 优先 date_birth
    pub fn birth_date_label(&self) -> String {
        self.date_birth
            .as_deref()
            .or(self.birthday.as_deref())
            .map(format_date)
            .unwrap_or_default()
    }
}

impl From<&CurrentUser> for UserInfo {
    fn from(user: &CurrentUser) -> Self {
        Self {
            nickname: user.name.clone(),
            email: user.email.clone(),
            date_birth: user.date_birth.clone(),
            birthday: user.birthday.clone(),
        }
    }
}

// `None` 渲染为空串；无法解析的时间原样返回
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}

fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    match raw.get(..10).map(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d")) {
        Some(Ok(date)) => date.format("%Y-%m-%d").to_string(),
        _ => raw.to_string(),
    }
}
