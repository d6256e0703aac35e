use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::config::RemoteConfig;
use crate::consts::JSON_CONTENT_TYPE;
use crate::error::Result;

/// Body posted to the collector.
#[derive(Debug, Serialize)]
pub struct QrPayload<'a> {
    pub content: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The collector answered with a 2xx status.
    Delivered { status: u16 },
    Rejected { status: u16 },
}

impl SendOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { .. } => write!(f, "QR sent successfully"),
            Self::Rejected { status } => write!(f, "Server rejected the QR (status {status})"),
        }
    }
}

/// Forwards decoded payloads to a remote collector, fire-and-forget style:
/// one POST, no retry.
#[derive(Clone, Debug)]
pub struct RemoteSender {
    client: Client,
    endpoint: Url,
}

impl RemoteSender {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn send(&self, content: &str) -> Result<SendOutcome> {
        let body = serde_json::to_vec(&QrPayload { content })?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .inspect_err(|e| warn!(endpoint = %self.endpoint, "failed to send QR: {e}"))?;

        let status = response.status();
        let outcome = if status.is_success() {
            SendOutcome::Delivered {
                status: status.as_u16(),
            }
        } else {
            SendOutcome::Rejected {
                status: status.as_u16(),
            }
        };
        info!(endpoint = %self.endpoint, status = status.as_u16(), "QR forwarded");
        Ok(outcome)
    }
}
