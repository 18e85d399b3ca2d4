use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    // 只存登录用户的本地缓存
    pub url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LogSettings {
    pub filter: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load(&run_mode, collect_env_vars(std::env::vars()))
    }

    fn load(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json =
            serde_json::to_string(&env_map).map_err(|e| ConfigError::Foreign(Box::new(e)))?;

        let s = config::Config::builder()
            .set_default("api.base_url", "http://127.0.0.1:3000")?
            .set_default("api.timeout_secs", 5)?
            .set_default("database.url", "sqlite://data/quill.db")?
            .set_default("log.filter", "info,sqlx=warn,hyper=warn")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars(vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
    vars.filter(|(k, _)| k.starts_with("QUILL_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("QUILL_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
