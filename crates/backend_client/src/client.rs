use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::domain::{AuthUser, Session};
use tracing::{debug, warn};
use url::Url;

use crate::{error::BackendError, query::TableQuery};

pub const DEFAULT_STORAGE_BUCKET: &str = "portfolio";
pub const DEFAULT_REPLY_FUNCTION: &str = "send-contact-reply";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub storage_bucket: String,
    pub reply_function: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            storage_bucket: DEFAULT_STORAGE_BUCKET.to_string(),
            reply_function: DEFAULT_REPLY_FUNCTION.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// REST client for the hosted backend: auth, tables, object storage and
/// functions, all authorised with the project's anon key plus an optional
/// user access token.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
    base_url: String,
    anon_key: String,
    storage_bucket: String,
    reply_function: String,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let invalid = |source: url::ParseError| BackendError::InvalidUrl {
            url: config.url.clone(),
            source,
        };
        let base = Url::parse(&config.url).map_err(invalid)?;
        if base.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self {
            http: Client::new(),
            base,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
            storage_bucket: config.storage_bucket,
            reply_function: config.reply_function,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage_bucket
    }

    pub fn reply_function(&self) -> &str {
        &self.reply_function
    }

    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let request = self
            .http
            .post(self.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let response = self.send(request, None).await?;
        decode(response).await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let request = self.http.post(self.endpoint("auth/v1/logout"));
        self.send(request, Some(access_token)).await?;
        Ok(())
    }

    pub async fn user_for_token(&self, access_token: &str) -> Result<AuthUser, BackendError> {
        let request = self.http.get(self.endpoint("auth/v1/user"));
        let response = self.send(request, Some(access_token)).await?;
        decode(response).await
    }

    /// Uploads (or replaces) an object and returns its public URL.
    pub async fn upload(
        &self,
        access_token: &str,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let request = self
            .http
            .post(self.object_url(&["storage", "v1", "object", bucket], path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes);
        self.send(request, Some(access_token)).await?;
        Ok(self.public_url(bucket, path))
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.object_url(&["storage", "v1", "object", "public", bucket], path)
            .to_string()
    }

    /// Object keys are split on `/` and each part percent-encoded, so names
    /// holding `#`, `?` or spaces address the object they were stored as.
    fn object_url(&self, prefix: &[&str], path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(prefix)
                .extend(path.split('/').filter(|part| !part.is_empty()));
        }
        url
    }

    pub async fn invoke<B: Serialize + ?Sized>(
        &self,
        access_token: Option<&str>,
        function: &str,
        body: &B,
    ) -> Result<serde_json::Value, BackendError> {
        let request = self
            .http
            .post(self.endpoint(&format!("functions/v1/{function}")))
            .json(body);
        let response = self.send(request, access_token).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Attaches the key headers, sends, and turns non-2xx replies into
    /// [`BackendError::Http`] carrying the backend's own message.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        access_token: Option<&str>,
    ) -> Result<Response, BackendError> {
        let bearer = access_token.unwrap_or(&self.anon_key);
        let response = request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url().path(), "backend response");
        if status.is_success() {
            return Ok(response);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|body| {
                body.message
                    .or(body.msg)
                    .or(body.error_description)
                    .or(body.error)
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| {
                if raw.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    raw.clone()
                }
            });
        warn!(status = status.as_u16(), %message, "backend request rejected");
        Err(BackendError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
