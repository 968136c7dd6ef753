use crate::catalog::domain::{
    AssetReference, DestroyStatus, ImagePayload, RemoteIdentifier, UploadedAsset,
};
use crate::ports::outbound::AssetStorage;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

/// Default Cloudinary API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Environment variables holding the account credentials
pub const ENV_CLOUD_NAME: &str = "CLOUDINARY_NAME";
pub const ENV_API_KEY: &str = "CLOUDINARY_API_KEY";
pub const ENV_API_SECRET: &str = "CLOUDINARY_SECRET_KEY";

/// Connection timeout; per-request deadlines are enforced by the callers
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Account credentials for the Cloudinary upload API
#[derive(Clone)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    api_secret: String,
}

impl CloudinaryCredentials {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Reads the credentials from the process environment
    ///
    /// # Errors
    /// Returns [`CatalogError::MissingCredential`] naming the first unset variable
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the credentials through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |variable: &str| -> Result<String> {
            lookup(variable)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| {
                    CatalogError::MissingCredential {
                        variable: variable.to_string(),
                    }
                    .into()
                })
        };

        Ok(Self::new(
            require(ENV_CLOUD_NAME)?,
            require(ENV_API_KEY)?,
            require(ENV_API_SECRET)?,
        ))
    }

    /// Signs request parameters: SHA-256 over `k=v` pairs sorted by key and
    /// joined with `&`, followed by the API secret
    fn sign(&self, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<_> = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// CloudinaryClient adapter for the Cloudinary image upload API
///
/// Implements the AssetStorage port with signed `upload` and `destroy`
/// requests. The client applies no overall request timeout of its own; the
/// workflows race every call against their own deadline.
pub struct CloudinaryClient {
    client: reqwest::Client,
    credentials: CloudinaryCredentials,
    api_base: String,
}

impl CloudinaryClient {
    pub fn new(credentials: CloudinaryCredentials) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("storefront-assets/{}", version);
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Points the client at another API host (used by tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.api_base,
            urlencoding::encode(&self.credentials.cloud_name),
            action
        )
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    /// Turns a non-2xx response into an error carrying the provider's message
    async fn error_from(response: reqwest::Response, action: &str) -> anyhow::Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        anyhow::anyhow!("Cloudinary {} returned status {}: {}", action, status, message)
    }

    fn content_type(file_name: &str) -> &'static str {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "avif" => "image/avif",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
impl AssetStorage for CloudinaryClient {
    async fn upload(&self, payload: &ImagePayload, folder: &str) -> Result<UploadedAsset> {
        let timestamp = Self::timestamp();
        let signature = self.credentials.sign(&[
            ("folder", folder.to_string()),
            ("timestamp", timestamp.clone()),
        ]);

        let file = Part::bytes(payload.bytes().to_vec())
            .file_name(payload.file_name().to_string())
            .mime_str(Self::content_type(payload.file_name()))?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.credentials.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        if !folder.is_empty() {
            form = form.text("folder", folder.to_string());
        }

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, "upload").await);
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(UploadedAsset::new(
            RemoteIdentifier::new(uploaded.public_id)?,
            AssetReference::new(uploaded.secure_url)?,
        ))
    }

    async fn destroy(&self, identifier: &RemoteIdentifier) -> Result<DestroyStatus> {
        let timestamp = Self::timestamp();
        let signature = self.credentials.sign(&[
            ("public_id", identifier.to_string()),
            ("timestamp", timestamp.clone()),
        ]);

        let fields = [
            ("public_id", identifier.as_str()),
            ("api_key", self.credentials.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];
        let body = fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response, "destroy").await);
        }

        let destroyed: DestroyResponse = response.json().await?;
        Ok(DestroyStatus::from_provider(&destroyed.result))
    }
}
