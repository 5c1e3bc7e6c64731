pub mod builder;
pub mod distractor;
pub mod grammar;
pub mod question;

pub use builder::HeadwordPattern;
pub use distractor::{
    CollocationSampler, DistractorSampler, HeadwordSampler, MeaningSampler, SynonymSampler,
    UnrelatedSampler,
};
pub use question::{Answer, ChoiceOption, Question, QuestionKind};

use crate::shuffle::shuffle_owned;
use crate::vocabulary::WordEntry;
use log::{debug, info, warn};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Knobs for question generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Pad meaning questions with "Nghĩa khác N" placeholders instead of
    /// dropping them when the pool has fewer than three other meanings
    pub pad_meaning_distractors: bool,
    /// Kinds that may be produced; anything not listed is never built
    pub enabled_kinds: Vec<QuestionKind>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            pad_meaning_distractors: false,
            enabled_kinds: QuestionKind::ALL.to_vec(),
        }
    }
}

impl GeneratorSettings {
    pub fn is_enabled(&self, kind: QuestionKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }
}

/// Builds the mixed-question battery for a word pool.
///
/// Generation is stateless: every call reads the pool and the random source
/// and returns fresh questions. The pool must not change during a call.
#[derive(Debug, Clone, Default)]
pub struct MixedQuestionGenerator {
    settings: GeneratorSettings,
}

impl MixedQuestionGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Every qualifying question for every word, in random order
    pub fn generate(&self, pool: &[WordEntry], rng: &mut dyn RngCore) -> Vec<Question> {
        if pool.is_empty() {
            debug!("empty word pool, nothing to generate");
            return Vec::new();
        }

        let mut questions = Vec::new();
        for word in pool {
            questions.extend(self.questions_for_word(word, pool, rng));
        }

        info!(
            "generated {} questions from {} words",
            questions.len(),
            pool.len()
        );
        shuffle_owned(questions, rng)
    }

    /// All questions one word contributes, in builder order
    pub fn questions_for_word(
        &self,
        word: &WordEntry,
        pool: &[WordEntry],
        rng: &mut dyn RngCore,
    ) -> Vec<Question> {
        if !word.is_well_formed() {
            warn!("skipping word {} with an empty headword", word.id);
            return Vec::new();
        }

        let enabled = |kind| self.settings.is_enabled(kind);
        let mut questions = Vec::new();

        if enabled(QuestionKind::Meaning) {
            questions.extend(builder::meaning_question(word, pool, &self.settings, rng));
        }

        if enabled(QuestionKind::ExampleFill) || enabled(QuestionKind::ExampleMcq) {
            if let Some(pattern) = HeadwordPattern::new(&word.english) {
                for example in &word.examples {
                    if enabled(QuestionKind::ExampleFill) {
                        questions.extend(builder::example_fill_question(word, example, &pattern));
                    }
                    if enabled(QuestionKind::ExampleMcq) {
                        questions.extend(builder::example_mcq_question(
                            word, example, &pattern, pool, rng,
                        ));
                    }
                }
            }
        }

        for collocation in &word.collocations {
            if enabled(QuestionKind::CollocationMcq) {
                questions.extend(builder::collocation_mcq_question(
                    word,
                    collocation,
                    pool,
                    rng,
                ));
            }
            if enabled(QuestionKind::CollocationFill) {
                questions.extend(builder::collocation_fill_question(word, collocation));
            }
        }

        if enabled(QuestionKind::CommonMistake) {
            for mistake in &word.common_mistakes {
                questions.extend(builder::common_mistake_question(word, mistake, rng));
            }
        }

        if !word.synonyms.is_empty() {
            if enabled(QuestionKind::Synonym) {
                questions.extend(builder::synonym_question(word, pool, rng));
            }
            if enabled(QuestionKind::OddOneOut) {
                questions.extend(builder::odd_one_out_question(word, pool, rng));
            }
        }

        if enabled(QuestionKind::NounCountability) {
            questions.extend(grammar::noun_countability_question(word, rng));
        }
        if enabled(QuestionKind::NounPlural) {
            questions.extend(grammar::noun_plural_question(word, rng));
        }
        if enabled(QuestionKind::VerbFormTense) {
            questions.extend(grammar::verb_form_tense_question(word, rng));
        }
        if enabled(QuestionKind::VerbFormMcq) {
            questions.extend(grammar::verb_form_mcq_question(word, rng));
        }

        debug!("word '{}' contributed {} questions", word.english, questions.len());
        questions
    }
}

/// Generate with default settings and the thread-local random source
pub fn generate_mixed_questions(pool: &[WordEntry]) -> Vec<Question> {
    generate_mixed_questions_with(pool, &GeneratorSettings::default(), &mut rand::thread_rng())
}

pub fn generate_mixed_questions_with(
    pool: &[WordEntry],
    settings: &GeneratorSettings,
    rng: &mut dyn RngCore,
) -> Vec<Question> {
    MixedQuestionGenerator::new(settings.clone()).generate(pool, rng)
}
