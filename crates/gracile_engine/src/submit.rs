use std::time::Duration;

use futures_util::StreamExt;
use gracile_logging::{gracile_debug, gracile_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::reply::parse_reply;
use crate::{FailureKind, ServerReply, SubmissionId, SubmitError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Scheme and host the endpoint paths are joined to.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 1024 * 1024,
        }
    }
}

/// Form fields as sent on the wire, in order.
pub type FormPairs = Vec<(String, String)>;

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(
        &self,
        submission_id: SubmissionId,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<ServerReply, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
    client: reqwest::Client,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SubmitSettings {
        &self.settings
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, SubmitError> {
        Url::parse(&self.settings.base_url)
            .and_then(|base| base.join(endpoint))
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        submission_id: SubmissionId,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<ServerReply, SubmitError> {
        let url = self.endpoint_url(endpoint)?;
        let body = encode_form(fields);
        gracile_info!(
            "POST submission_id={} url={} body_len={}",
            submission_id,
            url,
            body.len()
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(SubmitError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "reply too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(SubmitError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "reply too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        gracile_debug!(
            "Reply submission_id={} bytes={}",
            submission_id,
            bytes.len()
        );

        parse_reply(&bytes)
    }
}

/// `application/x-www-form-urlencoded` body, keeping field order.
pub fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(key, value)| (key.as_str(), value.as_str())))
        .finish()
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return SubmitError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
