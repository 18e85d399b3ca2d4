use domain::protocol::error_message;
use domain::UserId;
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::ApiError;

#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct HttpDriver {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpDriver {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        // base 以 / 结尾，拼接路径时保留前缀
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| ApiError::BaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BaseUrl {
                url: config.base_url,
                reason: "not a hierarchical url".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { base_url, http })
    }

    pub fn avatar_url(&self, user_id: &UserId) -> String {
        let mut url = self.url("api/portrait");
        url.query_pairs_mut().append_pair("uid", user_id.as_str());
        url.to_string()
    }

    pub(super) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/'));
        }
        url
    }

    pub(super) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        info!("{} {}", method, url);
        self.http.request(method, url)
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let body = Self::send(self.request(Method::GET, path).query(query)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(super) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut req = self.request(method, path).json(body);
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        Self::send(req).await
    }

    pub(super) async fn send(req: RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!("<- {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(base: &str) -> HttpDriver {
        HttpDriver::new(HttpConfig {
            base_url: base.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_url_keeps_base_path() {
        let d = driver("https://blog.example.org/mobile");
        assert_eq!(
            d.url("api/comments").as_str(),
            "https://blog.example.org/mobile/api/comments"
        );

        let d = driver("http://127.0.0.1:3000");
        assert_eq!(d.url("api/blog/7").as_str(), "http://127.0.0.1:3000/api/blog/7");
    }

    #[test]
    fn test_avatar_url() {
        let d = driver("http://127.0.0.1:3000/");
        assert_eq!(
            d.avatar_url(&UserId::new("u 1")),
            "http://127.0.0.1:3000/api/portrait?uid=u+1"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpDriver::new(HttpConfig {
            base_url: "not a url".into(),
            timeout: Duration::from_secs(1),
        })
        .err()
        .unwrap();
        assert!(matches!(err, ApiError::BaseUrl { .. }));
    }
}
