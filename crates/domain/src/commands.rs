use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{CommentId, PostId, UserId};
use crate::reply::ReplyContext;

pub fn check_comment(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    Ok(())
}

pub fn check_blog(title: &str, content: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyBlogContent);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    #[serde(rename = "bid")]
    pub post_id: PostId,
    pub content: String,
    #[serde(rename = "uid")]
    pub author_id: UserId,
    #[serde(rename = "rbid", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    #[serde(rename = "rtuid", skip_serializing_if = "Option::is_none")]
    pub reply_target_user_id: Option<UserId>,
    #[serde(rename = "rtuname", skip_serializing_if = "Option::is_none")]
    pub reply_target_nickname: Option<String>,
}

impl NewComment {
    // 父评论取线程根，回复对象取被点击评论的作者
    pub fn new(
        post_id: PostId,
        content: impl Into<String>,
        author_id: UserId,
        reply: &ReplyContext,
    ) -> Self {
        let target = reply.target();
        Self {
            post_id,
            content: content.into(),
            author_id,
            parent_id: target.map(|t| t.thread_root),
            reply_target_user_id: target.map(|t| t.user_id.clone()),
            reply_target_nickname: target.map(|t| t.nickname.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBlog {
    #[serde(rename = "uid")]
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub status: u8,
}

impl NewBlog {
    pub fn new(
        author_id: UserId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let content = content.into();
        check_blog(&title, &content)?;
        Ok(Self {
            author_id,
            title,
            content,
            // 1 = 已发布
            status: 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

impl Registration {
    // 昵称默认用邮箱
    pub fn new(email: &str, password: &str, confirm: &str) -> Result<Self, ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if password.trim().is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if password != confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
            nickname: email.to_string(),
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

// 改密码走 PUT /api/auth/register
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub user_id: UserId,
}

impl PasswordChange {
    pub fn new(
        user_id: UserId,
        old_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<Self, ValidationError> {
        if old_password.trim().is_empty() {
            return Err(ValidationError::EmptyOldPassword);
        }
        if new_password.trim().is_empty() {
            return Err(ValidationError::EmptyNewPassword);
        }
        if new_password != confirm {
            return Err(ValidationError::NewPasswordMismatch);
        }
        Ok(Self {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
            user_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub nickname: String,
    pub date_birth: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    pub user_id: UserId,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn mime(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext))
                if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                format!("image/{}", ext)
            }
            _ => "image".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentRecord;

    #[test]
    fn test_top_level_payload_omits_reply_fields() {
        let c = NewComment::new(PostId(3), "hello", UserId::new("u1"), &ReplyContext::Idle);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"bid": 3, "content": "hello", "uid": "u1"})
        );
    }

    #[test]
    fn test_reply_to_reply_payload_points_at_root() {
        let tapped = CommentRecord {
            id: CommentId(12),
            post_id: PostId(3),
            author_id: UserId::new("u9"),
            body: "nested".into(),
            parent_id: Some(CommentId(7)),
            reply_target_user_id: Some(UserId::new("u2")),
            reply_target_nickname: Some("Ann".into()),
            author_nickname: "Bob".into(),
            created_at: None,
        };
        let mut reply = ReplyContext::default();
        reply.reply_to(&tapped);

        let c = NewComment::new(PostId(3), "me too", UserId::new("u1"), &reply);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["rbid"], 7);
        assert_eq!(json["rtuid"], "u9");
        assert_eq!(json["rtuname"], "Bob");
    }

    #[test]
    fn test_check_comment() {
        assert_eq!(check_comment(""), Err(ValidationError::EmptyComment));
        assert_eq!(check_comment("  \n\t"), Err(ValidationError::EmptyComment));
        assert!(check_comment(" ok ").is_ok());
    }

    #[test]
    fn test_new_blog_validation() {
        let uid = UserId::new("u1");
        assert_eq!(
            NewBlog::new(uid.clone(), " ", "body"),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            NewBlog::new(uid.clone(), "title", ""),
            Err(ValidationError::EmptyBlogContent)
        );
        let blog = NewBlog::new(uid, "title", "body").unwrap();
        assert_eq!(blog.status, 1);
    }

    #[test]
    fn test_registration_validation() {
        assert_eq!(
            Registration::new("", "pw", "pw"),
            Err(ValidationError::EmptyEmail)
        );
        assert_eq!(
            Registration::new("a@b.c", " ", " "),
            Err(ValidationError::EmptyPassword)
        );
        assert_eq!(
            Registration::new("a@b.c", "pw", "px"),
            Err(ValidationError::PasswordMismatch)
        );
        let r = Registration::new("a@b.c", "pw", "pw").unwrap();
        assert_eq!(r.nickname, "a@b.c");
        assert_eq!(r.credentials().email, "a@b.c");
    }

    #[test]
    fn test_password_change() {
        let uid = UserId::new("u1");
        assert_eq!(
            PasswordChange::new(uid.clone(), "", "n", "n"),
            Err(ValidationError::EmptyOldPassword)
        );
        assert_eq!(
            PasswordChange::new(uid.clone(), "o", "", ""),
            Err(ValidationError::EmptyNewPassword)
        );
        assert_eq!(
            PasswordChange::new(uid.clone(), "o", "n", "m"),
            Err(ValidationError::NewPasswordMismatch)
        );
        let change = PasswordChange::new(uid, "o", "n", "n").unwrap();
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"oldPassword": "o", "newPassword": "n", "userId": "u1"})
        );
    }

    #[test]
    fn test_avatar_mime() {
        let mut upload = AvatarUpload {
            user_id: UserId::new("u1"),
            file_name: "me.png".into(),
            bytes: vec![],
        };
        assert_eq!(upload.mime(), "image/png");
        upload.file_name = "avatar".into();
        assert_eq!(upload.mime(), "image");
    }
}
