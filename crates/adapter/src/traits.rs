use async_trait::async_trait;
use domain::{
    AvatarUpload, Blog, BlogPage, CommentRecord, Credentials, CurrentUser, NewBlog, NewComment,
    PasswordChange, PostId, ProfileUpdate, Registration, UserId, UserInfo,
};

use crate::ApiError;

#[async_trait]
pub trait CommentBackend: Send + Sync {
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentRecord>, ApiError>;

    async fn post_comment(&self, comment: &NewComment) -> Result<(), ApiError>;
}

#[async_trait]
pub trait BlogBackend: Send + Sync {
    // page 从 1 开始
    async fn list_blogs(&self, page: u32, limit: u32) -> Result<BlogPage, ApiError>;

    async fn get_blog(&self, post_id: PostId) -> Result<Blog, ApiError>;

    async fn user_blogs(&self, user_id: &UserId) -> Result<Vec<Blog>, ApiError>;

    async fn publish_blog(&self, blog: &NewBlog) -> Result<(), ApiError>;
}

#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<CurrentUser, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    async fn user_info(&self, user_id: &UserId) -> Result<UserInfo, ApiError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError>;

    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        token: Option<&str>,
    ) -> Result<(), ApiError>;

    async fn upload_avatar(&self, upload: AvatarUpload, token: Option<&str>)
        -> Result<(), ApiError>;
}
