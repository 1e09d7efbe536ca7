// ============================================================
// Layer 2 — Publish Use Case
// ============================================================
// Uploads the previously exported bundle to the delivery
// service, and optionally asks the service to push it to
// enrolled devices.
//
// Publishing sends exactly the files that training exported.
// Nothing is retrained or re-exported here, so the same bundle
// can be published to several endpoints.
//
// The bearer credential is read from the DELIVERY_API_TOKEN
// environment variable (a .env file works too). Without it the
// upload is attempted unauthenticated, which public endpoints
// may allow.

use anyhow::{ensure, Result};

use crate::infra::export::Exporter;
use crate::infra::publisher::{Access, BundleMeta, Publisher, UploadReceipt};

/// Name of the environment variable holding the service token
pub const TOKEN_ENV_VAR: &str = "DELIVERY_API_TOKEN";

// ─── Publish Configuration ───────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub artifacts_dir: String,
    pub endpoint:      String,
    pub name:          String,
    pub tags:          Vec<String>,
    pub access:        Access,
    pub deliver:       bool,
}

// ─── PublishUseCase ──────────────────────────────────────────────────────────
pub struct PublishUseCase {
    config: PublishConfig,
}

impl PublishUseCase {
    pub fn new(config: PublishConfig) -> Self {
        Self { config }
    }

    /// Upload the bundle, then trigger delivery if requested.
    pub fn execute(&self) -> Result<UploadReceipt> {
        let cfg = &self.config;

        // ── Step 1: Locate the exported bundle ────────────────────────────────
        let exporter = Exporter::new(&cfg.artifacts_dir);
        let bundle   = exporter.bundle_paths();

        ensure!(
            bundle.model_path.exists() && bundle.lookup_path.exists(),
            "No exported bundle in '{}'. Run 'train' first.",
            cfg.artifacts_dir,
        );

        let manifest = exporter.load_manifest()?;

        // ── Step 2: Upload ────────────────────────────────────────────────────
        let token = std::env::var(TOKEN_ENV_VAR).ok();
        if token.is_none() {
            tracing::warn!("{TOKEN_ENV_VAR} is not set; uploading without credentials");
        }

        let publisher = Publisher::new(cfg.endpoint.clone(), token)?;

        let meta = BundleMeta {
            name:   cfg.name.clone(),
            tags:   cfg.tags.clone(),
            access: cfg.access,
            manifest,
        };

        let receipt = publisher.upload(&bundle, &meta)?;

        // ── Step 3: Optional delivery to devices ──────────────────────────────
        if cfg.deliver {
            publisher.deliver(&receipt.id)?;
        }

        Ok(receipt)
    }
}
