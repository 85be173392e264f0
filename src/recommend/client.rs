use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use super::prompt::build_request;
use super::types::{InferenceEnvelope, Recommendation};
use crate::config::ProviderConfig;
use crate::survey::MappedAnswers;

#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    #[error("Failed to reach provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("Unexpected provider response: {0}")]
    Envelope(String),
    #[error("Provider returned invalid JSON: {source}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Provider returned an incomplete recommendation")]
    Incomplete(Recommendation),
}

pub type RecommendResult<T> = Result<T, RecommendError>;

/// Something that can turn survey answers into a movie recommendation.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, answers: &MappedAnswers) -> RecommendResult<Recommendation>;
}

/// Client for the Workers AI inference REST endpoint.
///
/// Every call makes exactly one request; failures are not retried.
pub struct WorkersAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WorkersAiClient {
    pub fn new(config: &ProviderConfig) -> RecommendResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint_url(config),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Recommender for WorkersAiClient {
    async fn recommend(&self, answers: &MappedAnswers) -> RecommendResult<Recommendation> {
        debug!(?answers, "Requesting recommendation");

        let response = self
            .http
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&build_request(answers))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Provider request failed");
            return Err(RecommendError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        parse_response_body(&body)
    }
}

fn endpoint_url(config: &ProviderConfig) -> String {
    format!(
        "{}/accounts/{}/ai/run/{}",
        config.api_base.trim_end_matches('/'),
        config.account_id,
        config.model_id.trim_start_matches('/'),
    )
}

/// Decode the provider envelope and the model output nested inside it.
pub fn parse_response_body(body: &str) -> RecommendResult<Recommendation> {
    let envelope: InferenceEnvelope = serde_json::from_str(body)
        .map_err(|e| RecommendError::Envelope(format!("body is not JSON: {}", e)))?;

    let output = envelope
        .into_output()
        .ok_or_else(|| RecommendError::Envelope("missing `response` field".to_string()))?;

    parse_recommendation(output)
}

/// The model output is usually a JSON document encoded as a string, but
/// structured-output models may hand back the object directly.
pub fn parse_recommendation(output: Value) -> RecommendResult<Recommendation> {
    let (parsed, raw) = match output {
        Value::String(raw) => (serde_json::from_str::<Recommendation>(&raw), raw),
        other => {
            let raw = other.to_string();
            (serde_json::from_value::<Recommendation>(other), raw)
        }
    };

    let recommendation = parsed.map_err(|source| {
        error!(raw = %raw, "Failed to parse provider output");
        RecommendError::Parse { raw, source }
    })?;

    if !recommendation.is_complete() {
        error!(?recommendation, "Provider output has empty fields");
        return Err(RecommendError::Incomplete(recommendation));
    }

    Ok(recommendation)
}
