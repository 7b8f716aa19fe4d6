// src/transport/http.rs

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::Transport;
use crate::process::Record;

/// Raised before any network call when a record's JSON body is over the limit.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("payload of {size} bytes exceeds the {limit} byte limit")]
pub struct PayloadTooLarge {
    pub size: usize,
    pub limit: usize,
}

/// POSTs each record as a JSON body to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    max_payload_bytes: usize,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration, max_payload_bytes: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            max_payload_bytes,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, record: &Record) -> Result<()> {
        let body = serde_json::to_vec(record).context("serializing record")?;
        if body.len() > self.max_payload_bytes {
            return Err(PayloadTooLarge {
                size: body.len(),
                limit: self.max_payload_bytes,
            }
            .into());
        }

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", self.endpoint))?;
        let status = resp.status();
        resp.error_for_status()
            .with_context(|| format!("Non-success status from {}", self.endpoint))?;
        debug!(%status, "record accepted");
        Ok(())
    }
}

/// Dry-run transport: logs each JSON body instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl Transport for LogTransport {
    async fn send(&self, record: &Record) -> Result<()> {
        let body = serde_json::to_string(record).context("serializing record")?;
        info!(%body, "dry run");
        Ok(())
    }
}
