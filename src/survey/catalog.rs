/// One survey question together with its answer options.
///
/// Answer codes are dense and start at 1, so code `n` lives at `answers[n - 1]`.
#[derive(Debug)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub answers: &'static [&'static str],
}

impl Question {
    /// Display text for an answer code, if the code belongs to this question.
    pub fn answer(&self, code: i64) -> Option<&'static str> {
        let index = usize::try_from(code).ok()?.checked_sub(1)?;
        self.answers.get(index).copied()
    }
}

pub const NEED: Question = Question {
    id: "q1",
    text: "What do you need from a movie right now?",
    answers: &[
        "Escape / Transport me somewhere else",
        "Validate / See my feelings reflected",
        "Challenge / Question my assumptions",
        "Inspire / Lift me up & motivate me",
        "Soothe / Calm my mind & relax",
        "Connect / Feel understood & less alone",
    ],
};

pub const ENERGY: Question = Question {
    id: "q2",
    text: "How much mental energy do you have?",
    answers: &[
        "Depleted / I need something that asks nothing of me",
        "Present / I can follow along without strain",
        "Alert / I'm ready to think & be challenged",
        "Flexible / Surprise me based on my other answers",
    ],
};

pub const EXPERIENCE: Question = Question {
    id: "q3",
    text: "What kind of experience do you want?",
    answers: &[
        "Intimate / Close-up human stories, emotional depth",
        "Epic / Grand scale, sweeping scope, bigger-than-life",
        "Visceral / Strong sensory experience (visuals, sound, tension)",
        "Cerebral / Intellectual puzzle, ideas matter most",
        "Kinetic / Movement & momentum, things happen fast",
        "Surprise me / Let my answers guide you",
    ],
};

/// All questions, in the order they are validated.
pub static QUESTIONS: [&Question; 3] = [&NEED, &ENERGY, &EXPERIENCE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_counts() {
        assert_eq!(NEED.answers.len(), 6);
        assert_eq!(ENERGY.answers.len(), 4);
        assert_eq!(EXPERIENCE.answers.len(), 6);
    }

    #[test]
    fn test_answer_lookup() {
        assert_eq!(NEED.answer(1), Some("Escape / Transport me somewhere else"));
        assert_eq!(ENERGY.answer(4), Some("Flexible / Surprise me based on my other answers"));
        assert_eq!(EXPERIENCE.answer(6), Some("Surprise me / Let my answers guide you"));
        assert_eq!(NEED.answer(0), None);
        assert_eq!(NEED.answer(7), None);
        assert_eq!(ENERGY.answer(5), None);
        assert_eq!(NEED.answer(-1), None);
        assert_eq!(NEED.answer(i64::MAX), None);
    }

    #[test]
    fn test_question_order() {
        let ids: Vec<&str> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
    }
}
