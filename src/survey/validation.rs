use serde_json::Value;

use super::catalog::{Question, QUESTIONS};

/// The first problem found in a survey payload.
///
/// The `Display` output is what gets sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing answer for {0}")]
    Missing(&'static str),
    #[error("Answer for {0} must be an integer")]
    NotInteger(&'static str),
    #[error("Invalid answer for {0}")]
    Invalid(&'static str),
}

/// Answer codes that are known to exist in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedAnswers {
    need: i64,
    energy: i64,
    experience: i64,
}

impl ValidatedAnswers {
    pub fn need(&self) -> i64 {
        self.need
    }

    pub fn energy(&self) -> i64 {
        self.energy
    }

    pub fn experience(&self) -> i64 {
        self.experience
    }
}

/// Check every question in declaration order and stop at the first failure.
/// Keys that are not survey questions are ignored, and a payload that is not
/// a JSON object is treated as having no answers at all.
pub fn validate(payload: &Value) -> Result<ValidatedAnswers, ValidationError> {
    let mut codes = [0i64; 3];

    for (slot, question) in codes.iter_mut().zip(QUESTIONS.iter()) {
        *slot = validate_question(payload, question)?;
    }

    let [need, energy, experience] = codes;

    Ok(ValidatedAnswers {
        need,
        energy,
        experience,
    })
}

fn validate_question(payload: &Value, question: &Question) -> Result<i64, ValidationError> {
    let value = payload
        .get(question.id)
        .ok_or(ValidationError::Missing(question.text))?;

    let code = integer_value(value).ok_or(ValidationError::NotInteger(question.text))?;

    i64::try_from(code)
        .ok()
        .filter(|c| question.answer(*c).is_some())
        .ok_or(ValidationError::Invalid(question.text))
}

/// Integer value of a JSON number. Integral floats such as `2.0` count as
/// integers; booleans, every non-number type, and numbers too large for an
/// f64 (`1e400`) do not.
fn integer_value(value: &Value) -> Option<i128> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    match n.as_f64() {
        // saturating cast; anything this large is out of range anyway
        Some(f) if f.is_finite() && f.fract() == 0.0 => Some(f as i128),
        _ => None,
    }
}
