use adapter::{AccountBackend, BlogBackend};
use domain::{
    check_blog, AvatarUpload, Blog, Credentials, CurrentUser, NewBlog, PasswordChange,
    ProfileUpdate, Registration, UserInfo,
};
use storage::Db;
use tracing::{info, warn};

use crate::error::AccountError;

pub struct Session<B> {
    backend: B,
    db: Db,
}

impl<B> Session<B> {
    pub fn new(backend: B, db: Db) -> Self {
        Self { backend, db }
    }

    pub async fn current_user(&self) -> Result<Option<CurrentUser>, AccountError> {
        Ok(self.db.current_user().await?)
    }

    pub async fn require_user(&self) -> Result<CurrentUser, AccountError> {
        self.current_user()
            .await?
            .ok_or(AccountError::Unauthenticated)
    }

    pub async fn logout(&self) -> Result<(), AccountError> {
        self.db.clear_user().await?;
        info!("Session cleared");
        Ok(())
    }
}

impl<B: AccountBackend> Session<B> {
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentUser, AccountError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let user = self.backend.login(&credentials).await?;
        self.db.save_user(&user).await?;
        info!("Logged in as {}", user.id);
        Ok(user)
    }

    // 注册成功后直接登录
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<CurrentUser, AccountError> {
        let registration = Registration::new(email, password, confirm)?;
        self.backend.register(&registration).await?;
        info!("Registered {}", registration.email);

        let credentials = registration.credentials();
        self.login(&credentials.email, &credentials.password).await
    }

    pub async fn user_info(&self) -> Result<UserInfo, AccountError> {
        let user = self.require_user().await?;
        match self.backend.user_info(&user.id).await {
            Ok(info) => Ok(info),
            Err(e) => {
                // 请求失败时退回本地缓存
                warn!("Failed to fetch profile of {}, using cache: {}", user.id, e);
                Ok(UserInfo::from(&user))
            }
        }
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), AccountError> {
        let user = self.require_user().await?;
        let change = PasswordChange::new(user.id, old_password, new_password, confirm)?;
        self.backend.change_password(&change).await?;
        info!("Password updated for {}", change.user_id);
        Ok(())
    }

    pub async fn update_profile(
        &self,
        nickname: &str,
        date_birth: &str,
    ) -> Result<(), AccountError> {
        let mut user = self.require_user().await?;
        let update = ProfileUpdate {
            nickname: nickname.to_string(),
            date_birth: date_birth.to_string(),
            user_id: user.id.clone(),
        };
        self.backend
            .update_profile(&update, user.token.as_deref())
            .await?;

        user.name = Some(update.nickname);
        user.date_birth = Some(update.date_birth);
        self.db.save_user(&user).await?;
        Ok(())
    }

    pub async fn upload_avatar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AccountError> {
        let user = self.require_user().await?;
        let upload = AvatarUpload {
            user_id: user.id.clone(),
            file_name: file_name.to_string(),
            bytes,
        };
        self.backend
            .upload_avatar(upload, user.token.as_deref())
            .await?;
        info!("Avatar uploaded for {}", user.id);
        Ok(())
    }
}

impl<B: BlogBackend> Session<B> {
    // 先校验内容，再检查登录状态
    pub async fn publish_blog(&self, title: &str, content: &str) -> Result<(), AccountError> {
        check_blog(title, content)?;
        let user = self.require_user().await?;
        let blog = NewBlog::new(user.id, title, content)?;
        self.backend.publish_blog(&blog).await?;
        info!("Blog \"{}\" published", blog.title);
        Ok(())
    }

    pub async fn my_blogs(&self) -> Result<Vec<Blog>, AccountError> {
        let user = self.require_user().await?;
        Ok(self.backend.user_blogs(&user.id).await?)
    }
}
