use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument, warn};

use super::error::FetchError;
use super::fetcher::TrackingFetcher;
use super::normalize::{normalize, ProviderPayload};
use crate::model::TrackingSnapshot;

const BODY_EXCERPT_LEN: usize = 200;

/// [`TrackingFetcher`] backed by the tracking provider's REST API.
#[derive(Debug, Clone)]
pub struct HttpTrackingFetcher {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTrackingFetcher {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(
        base_url: Url,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder =
            Client::builder().user_agent(format!("tracking-refresh/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
            api_key,
        })
    }

    fn container_url(&self, container: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport {
                container: container.to_string(),
                message: format!("base url {} cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .push("containers")
            .push(container);
        Ok(url)
    }
}

#[async_trait]
impl TrackingFetcher for HttpTrackingFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, container: &str) -> Result<TrackingSnapshot, FetchError> {
        let url = self.container_url(container)?;
        debug!(%url, "Requesting tracking data");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let transport = |e: reqwest::Error| FetchError::Transport {
            container: container.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Tracking service rejected request");
            return Err(FetchError::Status {
                container: container.to_string(),
                status: status.as_u16(),
                body: body.chars().take(BODY_EXCERPT_LEN).collect(),
            });
        }

        let body = response.text().await.map_err(transport)?;

        let payload: ProviderPayload =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode {
                container: container.to_string(),
                message: e.to_string(),
            })?;

        Ok(normalize(container, payload))
    }
}
