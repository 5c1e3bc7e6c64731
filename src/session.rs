use crate::answer::check_answer;
use crate::error::SessionError;
use crate::generator::{Answer, GeneratorSettings, MixedQuestionGenerator, Question, QuestionKind};
use crate::vocabulary::Topic;
use chrono::{DateTime, Local};
use log::{debug, info};
use rand::RngCore;
use serde::Serialize;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// 1-based position of the question on screen
    pub current: usize,
    pub total: usize,
    pub percent: u32,
}

/// One answered question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub kind: QuestionKind,
    pub word: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub answered_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub stars: u8,
    pub message: &'static str,
}

impl SessionSummary {
    fn new(score: usize, total: usize) -> Self {
        let percentage = percent_of(score, total);
        let (stars, message) = match percentage {
            90.. => (3, "Excellent! Outstanding performance! 🎉"),
            70..=89 => (2, "Great job! Keep it up! 👏"),
            50..=69 => (1, "Good effort! Practice more! 💪"),
            _ => (0, "Keep practicing! You can do better! 📚"),
        };
        Self {
            score,
            total,
            percentage,
            stars,
            message,
        }
    }
}

fn percent_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// A mixed quiz over a fixed, ordered list of questions.
///
/// Each question is answered at most once, then the caller advances. The
/// session is finished once it advances past the last question.
#[derive(Debug, Clone)]
pub struct GameSession {
    topic_name: String,
    questions: Vec<Question>,
    index: usize,
    records: Vec<AnswerRecord>,
    started_at: DateTime<Local>,
}

impl GameSession {
    pub fn new(topic_name: impl Into<String>, questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        let topic_name = topic_name.into();
        info!(
            "starting session for '{}' with {} questions",
            topic_name,
            questions.len()
        );
        Ok(Self {
            topic_name,
            questions,
            index: 0,
            records: Vec::new(),
            started_at: Local::now(),
        })
    }

    /// Generate questions for a topic's vocabulary and start a session over them
    pub fn start(
        topic: &Topic,
        settings: &GeneratorSettings,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if topic.vocabulary.is_empty() {
            return Err(SessionError::EmptyTopic);
        }
        let questions =
            MixedQuestionGenerator::new(settings.clone()).generate(&topic.vocabulary, rng);
        Self::new(topic.display_name(), questions)
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn is_current_answered(&self) -> bool {
        self.records.len() > self.index
    }

    pub fn score(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct).count()
    }

    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        let current = (self.index + 1).min(total);
        Progress {
            current,
            total,
            percent: percent_of(current, total),
        }
    }

    /// Pick option `index` of the current multiple-choice question
    pub fn answer_choice(&mut self, index: usize) -> Result<AnswerRecord> {
        let question = self.answerable()?;
        let Answer::Choice { options } = &question.answer else {
            return Err(SessionError::WrongAnswerShape);
        };
        let picked = options.get(index).ok_or(SessionError::OptionOutOfRange {
            index,
            len: options.len(),
        })?;

        let correct_answer = question.correct_answer().unwrap_or_default().to_string();
        let record = AnswerRecord {
            kind: question.kind,
            word: question.word.clone(),
            user_answer: picked.text.clone(),
            correct_answer,
            is_correct: picked.is_correct,
            answered_at: Local::now(),
        };
        Ok(self.record(record))
    }

    /// Submit typed text for the current fill-in question
    pub fn answer_fill(&mut self, text: &str) -> Result<AnswerRecord> {
        let question = self.answerable()?;
        let Answer::Fill {
            correct_answer,
            accepted_answers,
        } = &question.answer
        else {
            return Err(SessionError::WrongAnswerShape);
        };
        let input = text.trim();
        if input.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let record = AnswerRecord {
            kind: question.kind,
            word: question.word.clone(),
            user_answer: input.to_string(),
            correct_answer: correct_answer.clone(),
            is_correct: check_answer(input, correct_answer, accepted_answers),
            answered_at: Local::now(),
        };
        Ok(self.record(record))
    }

    /// Move to the next question once the current one is answered
    pub fn advance(&mut self) -> Result<()> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if !self.is_current_answered() {
            return Err(SessionError::NotAnswered);
        }
        self.index += 1;
        if self.is_finished() {
            info!(
                "session for '{}' finished: {}/{}",
                self.topic_name,
                self.score(),
                self.questions.len()
            );
        }
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.score(), self.questions.len())
    }

    fn answerable(&self) -> Result<&Question> {
        if self.is_current_answered() {
            return Err(SessionError::AlreadyAnswered);
        }
        self.current().ok_or(SessionError::Finished)
    }

    fn record(&mut self, record: AnswerRecord) -> AnswerRecord {
        debug!(
            "answer for '{}' ({}): {:?} correct={}",
            record.word, record.kind, record.user_answer, record.is_correct
        );
        self.records.push(record.clone());
        record
    }
}
