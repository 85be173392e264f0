use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single movie suggestion returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Title including the release year, e.g. "Arrival (2016)".
    pub movie: String,
    pub reason: String,
    pub director: String,
}

impl Recommendation {
    pub(crate) fn is_complete(&self) -> bool {
        [&self.movie, &self.reason, &self.director]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Body of the inference request.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub prompt: String,
    pub response_format: ResponseFormat,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub repetition_penalty: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
    pub json_schema: JsonSchema,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchema {
    pub name: &'static str,
    pub schema: Value,
}

/// Response envelope. The REST API nests model output under `result`, the
/// worker binding returns it at the top level; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceEnvelope {
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub result: Option<InferenceResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceResult {
    #[serde(default)]
    pub response: Option<Value>,
}

impl InferenceEnvelope {
    pub fn into_output(self) -> Option<Value> {
        self.response
            .or_else(|| self.result.and_then(|r| r.response))
            .filter(|v| !v.is_null())
    }
}
