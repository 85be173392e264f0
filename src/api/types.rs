use serde::{Deserialize, Serialize};

use crate::recommend::Recommendation;

/// Successful reply. The key is plural for compatibility with existing
/// clients even though it holds a single recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Recommendation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
