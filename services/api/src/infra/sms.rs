use anyhow::Context as _;
use reqwest::{Client, Url};

use crate::domain::repository::SmsGateway;
use crate::error::ApiError;

/// SMS gateway reached with `GET {base}/{phone}/{code}/{template}`.
#[derive(Clone)]
pub struct HttpSmsGateway {
    client: Client,
    base_url: Url,
    template: String,
}

impl HttpSmsGateway {
    pub fn new(
        client: Client,
        base_url: &str,
        template: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("parse SMS gateway url")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("SMS gateway url cannot be a base: {base_url}");
        }
        Ok(Self {
            client,
            base_url,
            template: template.into(),
        })
    }

    /// Each part is appended as its own percent-encoded path segment.
    pub fn request_url(&self, phone: &str, code: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(phone).push(code).push(&self.template);
        }
        url
    }
}

impl SmsGateway for HttpSmsGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<(), ApiError> {
        // The url embeds the passcode; keep it out of logs.
        let resp = self
            .client
            .get(self.request_url(phone, code))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e.without_url(), "sms gateway unreachable");
                ApiError::SmsDeliveryFailed
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "sms gateway rejected send");
            return Err(ApiError::SmsDeliveryFailed);
        }
        Ok(())
    }
}
