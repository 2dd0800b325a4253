//! HTTP client for the display controller.
//!
//! Requests go out strictly one at a time. Response bodies carry no
//! meaning; only the status is checked.

use tracing::{debug, info};
use url::Url;

use crate::protocol::{INIT_PATH, SHOW_PATH, UploadPlan, chunk_path};
use crate::{EpdError, Result};

/// Connection to one display controller.
#[derive(Debug, Clone)]
pub struct DisplayClient {
    http: reqwest::Client,
    base: Url,
}

impl DisplayClient {
    /// Create a client for `host`, an IP address or hostname with an
    /// optional `:port`.
    pub fn new(host: &str) -> Result<Self> {
        let base = Url::parse(&format!("http://{host}/")).map_err(|source| EpdError::InvalidHost {
            host: host.to_string(),
            source,
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Base URL every request path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Upload a full frame: init, every chunk in order, then show.
    ///
    /// Stops at the first failed request; nothing after it is sent.
    pub async fn upload(&self, plan: &UploadPlan) -> Result<()> {
        info!(host = %self.base, chunks = plan.chunks().len(), "Sending...");
        self.post(INIT_PATH).await?;

        for (counter, chunk) in plan.chunks().iter().enumerate() {
            info!("Sending chunk {counter}...");
            self.post(&chunk_path(chunk)).await?;
        }

        self.post(SHOW_PATH).await?;
        info!("Done.");
        Ok(())
    }

    /// Execute a POST with an empty body. Any non-2xx status is an error.
    async fn post(&self, path: &str) -> Result<()> {
        let url = self.base.join(path).map_err(|source| EpdError::InvalidHost {
            host: self.base.to_string(),
            source,
        })?;
        let resp = self.http.post(url).send().await?;

        let status = resp.status();
        debug!(path, status = status.as_u16(), "Display responded");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EpdError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
