use adapter::{HttpConfig, HttpDriver};
use anyhow::Context;
use storage::Db;

use crate::account::Session;
use crate::config::Settings;
use crate::coordinator::CommentThread;
use domain::PostId;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub driver: HttpDriver,
}

impl AppState {
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let db = Db::new(&settings.database.url)
            .await
            .with_context(|| format!("Failed to open session store {}", settings.database.url))?;

        let driver = HttpDriver::new(HttpConfig {
            base_url: settings.api.base_url.clone(),
            timeout: settings.api.timeout(),
        })
        .context("Invalid API configuration")?;

        Ok(Self { db, driver })
    }

    pub fn session(&self) -> Session<HttpDriver> {
        Session::new(self.driver.clone(), self.db.clone())
    }

    pub fn comments(&self, post_id: PostId) -> CommentThread<HttpDriver> {
        CommentThread::new(self.driver.clone(), post_id)
    }
}
