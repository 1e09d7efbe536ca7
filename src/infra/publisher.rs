// ============================================================
// Layer 6 — Bundle Publisher
// ============================================================
// Uploads the exported bundle to the model delivery service and
// optionally triggers delivery to enrolled devices.
//
// The upload is one multipart POST to {endpoint}/models with:
//   - model        — the weights file (NextWord.mpk.gz)
//   - word_lookup  — the id → word table (word_lookup.json)
//   - name, tags, access — how the bundle is catalogued
//   - metadata     — the manifest JSON, so the service knows the
//                    tensor interface without opening the weights
//
// Delivery is a second POST to {endpoint}/models/{id}/deliver.
// Neither call retries: a failed upload or delivery surfaces as
// an error and the operator reruns the command.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use serde::{Deserialize, Serialize};

use crate::infra::export::{BundleManifest, ExportedBundle};

/// Who can fetch the published bundle from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Private,
    Public,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Private => "private",
            Access::Public  => "public",
        }
    }
}

/// Catalogue entry the bundle is published under.
#[derive(Debug, Clone, Serialize)]
pub struct BundleMeta {
    pub name:     String,
    pub tags:     Vec<String>,
    pub access:   Access,
    pub manifest: BundleManifest,
}

/// What the service returns for a stored bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    /// Service-assigned bundle id, used for delivery
    pub id: String,

    /// Version the service assigned, if it versions bundles
    #[serde(default)]
    pub version: Option<String>,
}

pub struct Publisher {
    client:   Client,
    endpoint: String,
    token:    Option<String>,
}

impl Publisher {
    /// Create a publisher for one service endpoint.
    /// The token, when present, is sent as a bearer credential
    /// on every call.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Cannot build HTTP client")?;

        let endpoint = endpoint.into();
        let endpoint = endpoint.trim_end_matches('/').to_string();

        Ok(Self { client, endpoint, token })
    }

    /// Upload both bundle files and the catalogue fields.
    pub fn upload(&self, bundle: &ExportedBundle, meta: &BundleMeta) -> Result<UploadReceipt> {
        let url = format!("{}/models", self.endpoint);

        let form = multipart::Form::new()
            .text("name", meta.name.clone())
            .text("tags", meta.tags.join(","))
            .text("access", meta.access.as_str())
            .text("metadata", serde_json::to_string(&meta.manifest)?)
            .file("model", &bundle.model_path)
            .with_context(|| {
                format!("Cannot attach weights file '{}'", bundle.model_path.display())
            })?
            .file("word_lookup", &bundle.lookup_path)
            .with_context(|| {
                format!("Cannot attach lookup file '{}'", bundle.lookup_path.display())
            })?;

        tracing::info!("Uploading bundle '{}' to {}", meta.name, url);

        let mut request = self.client.post(&url).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .with_context(|| format!("Upload request to '{url}' failed"))?
            .error_for_status()
            .context("Delivery service rejected the upload")?;

        let receipt: UploadReceipt = response
            .json()
            .context("Upload succeeded but the service response was not valid JSON")?;

        tracing::info!("Bundle stored with id '{}'", receipt.id);
        Ok(receipt)
    }

    /// Ask the service to push an uploaded bundle to devices.
    pub fn deliver(&self, bundle_id: &str) -> Result<()> {
        let url = format!("{}/models/{}/deliver", self.endpoint, bundle_id);

        tracing::info!("Requesting delivery of bundle '{bundle_id}'");

        let mut request = self.client.post(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .with_context(|| format!("Delivery request to '{url}' failed"))?
            .error_for_status()
            .context("Delivery service rejected the delivery request")?;

        tracing::info!("Delivery of bundle '{bundle_id}' accepted");
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&Access::Private).unwrap(), "\"private\"");
        assert_eq!(serde_json::to_string(&Access::Public).unwrap(), "\"public\"");
        assert_eq!(Access::Private.as_str(), "private");
    }

    #[test]
    fn test_receipt_parses_with_and_without_version() {
        let bare: UploadReceipt = serde_json::from_str(r#"{"id":"m-42"}"#).unwrap();
        assert_eq!(bare.id, "m-42");
        assert_eq!(bare.version, None);

        let full: UploadReceipt =
            serde_json::from_str(r#"{"id":"m-42","version":"3"}"#).unwrap();
        assert_eq!(full.version.as_deref(), Some("3"));
    }

    #[test]
    fn test_endpoint_trailing_slash_is_trimmed() {
        let publisher = Publisher::new("https://models.example.com/api/", None).unwrap();
        assert_eq!(publisher.endpoint, "https://models.example.com/api");
    }
}
