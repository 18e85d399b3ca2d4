use async_trait::async_trait;
use domain::protocol::{BlogList, LoginReply};
use domain::{
    AvatarUpload, Blog, BlogPage, CommentRecord, Credentials, CurrentUser, NewBlog, NewComment,
    PasswordChange, PostId, ProfileUpdate, Registration, UserId, UserInfo,
};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{info, warn};

use super::driver::HttpDriver;
use crate::common::response::{check_ack, require_ack};
use crate::traits::{AccountBackend, BlogBackend, CommentBackend};
use crate::ApiError;

#[async_trait]
impl CommentBackend for HttpDriver {
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentRecord>, ApiError> {
        // 没有评论时后端可能返回 null
        let comments: Option<Vec<CommentRecord>> = self
            .get_json("api/comments", &[("bid", post_id.to_string())])
            .await?;
        Ok(comments.unwrap_or_default())
    }

    async fn post_comment(&self, comment: &NewComment) -> Result<(), ApiError> {
        let body = self
            .send_json(Method::POST, "api/comments", comment, None)
            .await?;
        check_ack(&body, "Failed to post comment")?;
        info!(
            "Comment posted on blog {} (reply to {:?})",
            comment.post_id, comment.parent_id
        );
        Ok(())
    }
}

#[async_trait]
impl BlogBackend for HttpDriver {
    async fn list_blogs(&self, page: u32, limit: u32) -> Result<BlogPage, ApiError> {
        self.get_json(
            "api/blogs",
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn get_blog(&self, post_id: PostId) -> Result<Blog, ApiError> {
        self.get_json(&format!("api/blog/{}", post_id), &[]).await
    }

    async fn user_blogs(&self, user_id: &UserId) -> Result<Vec<Blog>, ApiError> {
        let list: BlogList = self
            .get_json("api/blogs", &[("uid", user_id.to_string())])
            .await?;
        Ok(list.blogs)
    }

    async fn publish_blog(&self, blog: &NewBlog) -> Result<(), ApiError> {
        let body = self.send_json(Method::POST, "api/blog", blog, None).await?;
        require_ack(&body, "Unknown error")
    }
}

#[async_trait]
impl AccountBackend for HttpDriver {
    async fn login(&self, credentials: &Credentials) -> Result<CurrentUser, ApiError> {
        let body = self
            .send_json(Method::POST, "api/mobileLogin", credentials, None)
            .await?;
        let reply: LoginReply = serde_json::from_str(&body)?;

        match reply {
            LoginReply {
                success: true,
                user: Some(user),
                ..
            } => Ok(user),
            LoginReply { error, .. } => {
                warn!("Login rejected for {}", credentials.email);
                Err(ApiError::Rejected(
                    error.unwrap_or_else(|| "Login failed".to_string()),
                ))
            }
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let body = self
            .send_json(Method::POST, "api/auth/register", registration, None)
            .await?;
        require_ack(&body, "Register failed")
    }

    async fn user_info(&self, user_id: &UserId) -> Result<UserInfo, ApiError> {
        self.get_json("api/user/info", &[("userId", user_id.to_string())])
            .await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let body = self
            .send_json(Method::PUT, "api/auth/register", change, None)
            .await?;
        require_ack(&body, "Failed to update password")
    }

    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        self.send_json(Method::PUT, "api/user/update", update, token)
            .await?;
        Ok(())
    }

    async fn upload_avatar(
        &self,
        upload: AvatarUpload,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mime = upload.mime();
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        // 没有扩展名时只有 "image"，不是合法 MIME，交给 reqwest 默认值
        if mime.contains('/') {
            part = part.mime_str(&mime)?;
        }
        let form = Form::new()
            .part("file", part)
            .text("userId", upload.user_id.to_string());

        let mut req = self
            .request(Method::POST, "api/portrait/upload")
            .multipart(form);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        Self::send(req).await?;
        Ok(())
    }
}
