use serde::{Deserialize, Serialize};

/// The twelve question kinds of the mixed quiz
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[strum(to_string = "Meaning")]
    Meaning,
    #[strum(to_string = "Fill in the Blank")]
    ExampleFill,
    #[strum(to_string = "Example")]
    ExampleMcq,
    #[strum(to_string = "Collocation")]
    CollocationMcq,
    #[strum(to_string = "Collocation")]
    CollocationFill,
    #[strum(to_string = "Common Mistake")]
    CommonMistake,
    #[strum(to_string = "Synonym")]
    Synonym,
    #[strum(to_string = "Odd One Out")]
    OddOneOut,
    #[strum(to_string = "Noun Grammar")]
    NounCountability,
    #[strum(to_string = "Plural Form")]
    NounPlural,
    #[strum(to_string = "Verb Tense")]
    VerbFormTense,
    #[strum(to_string = "Verb Forms")]
    VerbFormMcq,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 12] = [
        QuestionKind::Meaning,
        QuestionKind::ExampleFill,
        QuestionKind::ExampleMcq,
        QuestionKind::CollocationMcq,
        QuestionKind::CollocationFill,
        QuestionKind::CommonMistake,
        QuestionKind::Synonym,
        QuestionKind::OddOneOut,
        QuestionKind::NounCountability,
        QuestionKind::NounPlural,
        QuestionKind::VerbFormTense,
        QuestionKind::VerbFormMcq,
    ];

    pub fn is_fill(&self) -> bool {
        matches!(self, QuestionKind::ExampleFill | QuestionKind::CollocationFill)
    }

    /// Whether a presentation layer should show the headword next to the prompt.
    /// Example and collocation questions would give the answer away.
    pub fn shows_word_label(&self) -> bool {
        !matches!(
            self,
            QuestionKind::ExampleFill
                | QuestionKind::ExampleMcq
                | QuestionKind::CollocationFill
                | QuestionKind::CollocationMcq
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceOption {
    pub text: String,
    pub is_correct: bool,
}

impl ChoiceOption {
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
        }
    }

    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Answer {
    Choice {
        options: Vec<ChoiceOption>,
    },
    Fill {
        correct_answer: String,
        accepted_answers: Vec<String>,
    },
}

/// A generated question; an immutable value handed to the quiz session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Headword of the source entry
    pub word: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(flatten)]
    pub answer: Answer,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_vi: Option<String>,
}

impl Question {
    pub fn is_fill(&self) -> bool {
        matches!(self.answer, Answer::Fill { .. })
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match &self.answer {
            Answer::Choice { options } => options,
            Answer::Fill { .. } => &[],
        }
    }

    /// Text of the correct option, or the canonical fill answer
    pub fn correct_answer(&self) -> Option<&str> {
        match &self.answer {
            Answer::Choice { options } => options
                .iter()
                .find(|o| o.is_correct)
                .map(|o| o.text.as_str()),
            Answer::Fill { correct_answer, .. } => Some(correct_answer),
        }
    }
}
