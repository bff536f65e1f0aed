use reqwest::{Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Shared HTTP handle for the quiz backend REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn connect(config: &Config) -> AppResult<Self> {
        let mut base = config.api_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::ConfigError(format!("invalid API base URL '{}': {}", base, e))
        })?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        log::debug!("API client targeting {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::InternalError(format!("bad endpoint '{}': {}", path, e)))
    }

    /// GETs `path` and decodes the JSON body. A 404 comes back as `Ok(None)`.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("GET", path, status, &body));
        }

        Ok(Some(response.json::<T>().await?))
    }

    pub async fn post_json<B>(&self, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("POST", path, status, &body));
        }
        Ok(())
    }
}

fn status_error(method: &str, path: &str, status: StatusCode, body: &str) -> AppError {
    let body = body.trim();
    if body.is_empty() {
        AppError::HttpError(format!("{} {} returned {}", method, path, status))
    } else {
        AppError::HttpError(format!("{} {} returned {}: {}", method, path, status, body))
    }
}
