use serde::Serialize;

use super::catalog::{Question, ENERGY, EXPERIENCE, NEED};
use super::validation::ValidatedAnswers;

/// Survey answers in their descriptive form, as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedAnswers {
    pub need: &'static str,
    pub energy: &'static str,
    pub experience_type: &'static str,
}

/// Replace answer codes with catalog text. Only the survey questions are
/// mapped; anything else the client sent was already dropped by validation.
pub fn map_answers(answers: &ValidatedAnswers) -> MappedAnswers {
    MappedAnswers {
        need: text_for(&NEED, answers.need()),
        energy: text_for(&ENERGY, answers.energy()),
        experience_type: text_for(&EXPERIENCE, answers.experience()),
    }
}

fn text_for(question: &Question, code: i64) -> &'static str {
    // ValidatedAnswers can only be built by validate(), from catalog codes
    question.answer(code).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::validate;
    use serde_json::json;

    #[test]
    fn test_map_validated_answers() {
        let answers = validate(&json!({"q1": 1, "q2": 2, "q3": 3})).unwrap();
        let mapped = map_answers(&answers);
        assert_eq!(mapped.need, "Escape / Transport me somewhere else");
        assert_eq!(mapped.energy, "Present / I can follow along without strain");
        assert_eq!(
            mapped.experience_type,
            "Visceral / Strong sensory experience (visuals, sound, tension)"
        );
    }

    #[test]
    fn test_extra_keys_not_mapped() {
        let answers = validate(&json!({"q1": 6, "q2": 4, "q3": 6, "extra": "x"})).unwrap();
        let mapped = map_answers(&answers);
        assert_eq!(
            mapped,
            MappedAnswers {
                need: NEED.answers[5],
                energy: ENERGY.answers[3],
                experience_type: EXPERIENCE.answers[5],
            }
        );

        let value = serde_json::to_value(&mapped).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("extra").is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let answers = validate(&json!({"q1": 5, "q2": 1, "q3": 4})).unwrap();
        let value = serde_json::to_value(map_answers(&answers)).unwrap();
        assert_eq!(value["need"], "Soothe / Calm my mind & relax");
        assert_eq!(value["energy"], "Depleted / I need something that asks nothing of me");
        assert_eq!(value["experienceType"], "Cerebral / Intellectual puzzle, ideas matter most");
    }
}
