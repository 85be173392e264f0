use serde_json::json;

use super::types::{InferenceRequest, JsonSchema, ResponseFormat};
use crate::survey::MappedAnswers;

// Sampling parameters are fixed; clients cannot change them.
const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.6;
const TOP_P: f32 = 0.9;
const TOP_K: u32 = 40;
const REPETITION_PENALTY: f32 = 1.1;
const PRESENCE_PENALTY: f32 = 0.1;
const FREQUENCY_PENALTY: f32 = 0.05;

pub const SCHEMA_NAME: &str = "movie_recommendation";

pub fn build_prompt(answers: &MappedAnswers) -> String {
    format!(
        "You recommend ONE specific movie matching user needs. Return ONLY valid JSON.\n\
         \n\
         User Need: {}\n\
         Mental Energy: {}\n\
         Experience Type: {}\n\
         \n\
         Match all three dimensions. Real movie only. No disclaimers.",
        answers.need, answers.energy, answers.experience_type
    )
}

/// JSON schema the model output must follow: three required strings and
/// nothing else.
pub fn recommendation_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "movie": {
                "type": "string",
                "description": "Movie title with release year"
            },
            "reason": {
                "type": "string",
                "description": "Why this matches their need, energy, and experience"
            },
            "director": {
                "type": "string",
                "description": "Director name"
            }
        },
        "required": ["movie", "reason", "director"],
        "additionalProperties": false
    })
}

pub fn build_request(answers: &MappedAnswers) -> InferenceRequest {
    InferenceRequest {
        prompt: build_prompt(answers),
        response_format: ResponseFormat {
            format_type: "json_schema",
            json_schema: JsonSchema {
                name: SCHEMA_NAME,
                schema: recommendation_schema(),
            },
        },
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
        top_k: TOP_K,
        repetition_penalty: REPETITION_PENALTY,
        presence_penalty: PRESENCE_PENALTY,
        frequency_penalty: FREQUENCY_PENALTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> MappedAnswers {
        MappedAnswers {
            need: "Escape / Transport me somewhere else",
            energy: "Present / I can follow along without strain",
            experience_type: "Epic / Grand scale, sweeping scope, bigger-than-life",
        }
    }

    #[test]
    fn test_prompt_embeds_answers() {
        let prompt = build_prompt(&answers());
        assert!(prompt.starts_with("You recommend ONE specific movie"));
        assert!(prompt.contains("User Need: Escape / Transport me somewhere else\n"));
        assert!(prompt.contains("Mental Energy: Present / I can follow along without strain\n"));
        assert!(prompt.contains(
            "Experience Type: Epic / Grand scale, sweeping scope, bigger-than-life\n"
        ));
        assert!(prompt.ends_with("No disclaimers."));
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(build_request(&answers())).unwrap();
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], SCHEMA_NAME);

        let schema = &body["response_format"]["json_schema"]["schema"];
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["movie", "reason", "director"]));
        for field in ["movie", "reason", "director"] {
            assert_eq!(schema["properties"][field]["type"], "string");
        }

        assert_eq!(body["max_tokens"], 200);
        assert_eq!(body["top_k"], 40);
        assert!((body["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    }
}
