use super::distractor::{
    CollocationSampler, DistractorSampler, HeadwordSampler, MeaningSampler, SynonymSampler,
    UnrelatedSampler,
};
use super::question::{Answer, ChoiceOption, Question, QuestionKind};
use super::GeneratorSettings;
use crate::shuffle::shuffle_owned;
use crate::vocabulary::{Collocation, CommonMistake, Example, WordEntry};
use itertools::Itertools;
use rand::RngCore;
use regex::Regex;

pub const BLANK: &str = "____";

/// Wrong options needed for a four-way multiple choice question
pub const CHOICE_DISTRACTORS: usize = 3;

const ODD_ONE_OUT_SYNONYMS: usize = 3;

/// Correct option plus distractors, in random order
pub(crate) fn choice_answer(
    correct: &str,
    distractors: Vec<String>,
    rng: &mut dyn RngCore,
) -> Answer {
    let options: Vec<ChoiceOption> = std::iter::once(ChoiceOption::correct(correct))
        .chain(distractors.into_iter().map(ChoiceOption::wrong))
        .collect();
    Answer::Choice {
        options: shuffle_owned(options, rng),
    }
}

fn fill_answer(correct: String) -> Answer {
    Answer::Fill {
        accepted_answers: vec![correct.clone()],
        correct_answer: correct,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Case-insensitive whole-word matcher for a headword, compiled once per entry
#[derive(Debug, Clone)]
pub struct HeadwordPattern(Regex);

impl HeadwordPattern {
    pub fn new(headword: &str) -> Option<Self> {
        let headword = headword.trim();
        if headword.is_empty() {
            return None;
        }
        Regex::new(&format!(r"(?i)\b{}\b", regex::escape(headword)))
            .ok()
            .map(Self)
    }

    /// Sentence with every occurrence of the headword blanked, if it occurs at all
    pub fn blank(&self, sentence: &str) -> Option<String> {
        if !self.0.is_match(sentence) {
            return None;
        }
        Some(self.0.replace_all(sentence, BLANK).into_owned())
    }
}

pub fn meaning_question(
    word: &WordEntry,
    pool: &[WordEntry],
    settings: &GeneratorSettings,
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let correct = word.meaning_text()?;
    let mut distractors = MeaningSampler.sample(word, pool, CHOICE_DISTRACTORS, rng);

    if distractors.len() < CHOICE_DISTRACTORS {
        if !settings.pad_meaning_distractors {
            return None;
        }
        pad_meaning_distractors(&mut distractors, correct);
    }

    Some(Question {
        kind: QuestionKind::Meaning,
        word: word.english.clone(),
        question: format!("What is the meaning of \"{}\"?", word.english),
        context: None,
        answer: choice_answer(correct, distractors, rng),
        explanation: correct.to_string(),
        translation_vi: None,
    })
}

/// Fill the gap with generic placeholders so small topics still get four options
fn pad_meaning_distractors(distractors: &mut Vec<String>, correct: &str) {
    let mut n = distractors.len() + 1;
    while distractors.len() < CHOICE_DISTRACTORS {
        let placeholder = format!("Nghĩa khác {n}");
        if placeholder != correct && !distractors.contains(&placeholder) {
            distractors.push(placeholder);
        }
        n += 1;
    }
}

pub fn example_fill_question(
    word: &WordEntry,
    example: &Example,
    pattern: &HeadwordPattern,
) -> Option<Question> {
    let blanked = pattern.blank(&example.en)?;
    let correct = word.english.trim().to_lowercase();

    Some(Question {
        kind: QuestionKind::ExampleFill,
        word: word.english.clone(),
        question: format!("Fill in the blank: {blanked}"),
        context: None,
        answer: fill_answer(correct),
        explanation: format!("Complete sentence: {}", example.en),
        translation_vi: non_empty(&example.vi),
    })
}

pub fn example_mcq_question(
    word: &WordEntry,
    example: &Example,
    pattern: &HeadwordPattern,
    pool: &[WordEntry],
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let blanked = pattern.blank(&example.en)?;
    let distractors = HeadwordSampler.sample(word, pool, CHOICE_DISTRACTORS, rng);
    if distractors.len() < CHOICE_DISTRACTORS {
        return None;
    }

    Some(Question {
        kind: QuestionKind::ExampleMcq,
        word: word.english.clone(),
        question: format!("Choose the correct word: {blanked}"),
        context: None,
        answer: choice_answer(&word.english, distractors, rng),
        explanation: format!("Complete sentence: {}", example.en),
        translation_vi: non_empty(&example.vi),
    })
}

fn collocation_context(collocation: &Collocation) -> Option<String> {
    non_empty(&collocation.kind).map(|kind| format!("Type: {kind}"))
}

pub fn collocation_mcq_question(
    word: &WordEntry,
    collocation: &Collocation,
    pool: &[WordEntry],
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let expression = non_empty(&collocation.expression)?;
    let distractors = CollocationSampler.sample(word, pool, CHOICE_DISTRACTORS, rng);
    if distractors.len() < CHOICE_DISTRACTORS {
        return None;
    }

    Some(Question {
        kind: QuestionKind::CollocationMcq,
        word: word.english.clone(),
        question: "Which is the correct collocation?".to_string(),
        context: collocation_context(collocation),
        answer: choice_answer(&expression, distractors, rng),
        explanation: format!("Correct collocation: {expression}"),
        translation_vi: non_empty(&collocation.example_vi),
    })
}

pub fn collocation_fill_question(word: &WordEntry, collocation: &Collocation) -> Option<Question> {
    let tokens: Vec<&str> = collocation.expression.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }

    let headword = word.english.trim().to_lowercase();
    let blank_index = tokens
        .iter()
        .position(|t| t.to_lowercase() == headword)
        .unwrap_or(0);

    let blanked = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| if i == blank_index { BLANK } else { *t })
        .join(" ");

    Some(Question {
        kind: QuestionKind::CollocationFill,
        word: word.english.clone(),
        question: format!("Complete the collocation: {blanked}"),
        context: collocation_context(collocation),
        answer: fill_answer(tokens[blank_index].to_lowercase()),
        explanation: format!("Correct collocation: {}", tokens.join(" ")),
        translation_vi: non_empty(&collocation.example_vi),
    })
}

pub fn common_mistake_question(
    word: &WordEntry,
    mistake: &CommonMistake,
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let correct = non_empty(&mistake.correct)?;
    let wrong = non_empty(&mistake.wrong)?;
    if correct == wrong {
        return None;
    }

    Some(Question {
        kind: QuestionKind::CommonMistake,
        word: word.english.clone(),
        question: "Which sentence is correct?".to_string(),
        context: None,
        answer: choice_answer(&correct, vec![wrong], rng),
        explanation: mistake.explanation.clone(),
        translation_vi: None,
    })
}

pub fn synonym_question(
    word: &WordEntry,
    pool: &[WordEntry],
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let correct = word.synonyms.first().and_then(|s| non_empty(s))?;
    let distractors = SynonymSampler.sample(word, pool, CHOICE_DISTRACTORS, rng);
    if distractors.len() < CHOICE_DISTRACTORS {
        return None;
    }

    Some(Question {
        kind: QuestionKind::Synonym,
        word: word.english.clone(),
        question: format!("Which word is a synonym of \"{}\"?", word.english),
        context: None,
        answer: choice_answer(&correct, distractors, rng),
        explanation: format!("All synonyms: {}", word.synonyms.join(", ")),
        translation_vi: None,
    })
}

/// The correct option is the one word that is not a synonym
pub fn odd_one_out_question(
    word: &WordEntry,
    pool: &[WordEntry],
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let synonyms: Vec<String> = word
        .synonyms
        .iter()
        .filter_map(|s| non_empty(s))
        .unique_by(|s| s.to_lowercase())
        .take(ODD_ONE_OUT_SYNONYMS)
        .collect();
    if synonyms.len() < 2 {
        return None;
    }

    let unrelated = UnrelatedSampler.sample(word, pool, 1, rng).into_iter().next()?;

    Some(Question {
        kind: QuestionKind::OddOneOut,
        word: word.english.clone(),
        question: format!("Which word is NOT a synonym of \"{}\"?", word.english),
        context: None,
        answer: choice_answer(&unrelated, synonyms, rng),
        explanation: format!(
            "Synonyms of \"{}\": {}",
            word.english,
            word.synonyms.join(", ")
        ),
        translation_vi: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{Level, WordType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn example(en: &str) -> Example {
        Example {
            level: Some(Level::Beginner),
            en: en.to_string(),
            vi: "câu ví dụ".to_string(),
        }
    }

    fn collocation(kind: &str, expression: &str) -> Collocation {
        Collocation {
            kind: kind.to_string(),
            expression: expression.to_string(),
            example: String::new(),
            example_vi: "ví dụ".to_string(),
        }
    }

    fn create_verb_pool() -> Vec<WordEntry> {
        let mut pool: Vec<WordEntry> = ["run", "walk", "swim", "jump"]
            .iter()
            .enumerate()
            .map(|(i, w)| WordEntry::new(i as u64 + 1, *w, WordType::Verb))
            .collect();
        let meanings = ["chạy", "đi bộ", "bơi", "nhảy"];
        for (w, m) in pool.iter_mut().zip(meanings) {
            w.vietnamese_meaning = Some(m.to_string());
        }
        pool
    }

    fn assert_well_formed_choice(q: &Question) {
        let options = q.options();
        assert!(options.len() >= 2);
        assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);
        let texts: HashSet<&str> = options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts.len(), options.len(), "duplicate options in {q:?}");
    }

    #[test]
    fn test_headword_pattern_whole_word() {
        let pattern = HeadwordPattern::new("go").unwrap();
        assert_eq!(
            pattern.blank("Go home and go to bed.").as_deref(),
            Some("____ home and ____ to bed.")
        );
        assert_eq!(pattern.blank("The goat is going."), None);
    }

    #[test]
    fn test_headword_pattern_escapes_metacharacters() {
        let pattern = HeadwordPattern::new("a.m.").unwrap();
        assert_eq!(pattern.blank("I woke at 7 axmx today."), None);
        assert!(HeadwordPattern::new("   ").is_none());
    }

    #[test]
    fn test_meaning_question() {
        let pool = create_verb_pool();
        let mut rng = StdRng::seed_from_u64(42);
        let settings = GeneratorSettings::default();

        let q = meaning_question(&pool[0], &pool, &settings, &mut rng).unwrap();
        assert_eq!(q.kind, QuestionKind::Meaning);
        assert_eq!(q.question, "What is the meaning of \"run\"?");
        assert_eq!(q.correct_answer(), Some("chạy"));
        assert_eq!(q.options().len(), 4);
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_meaning_question_suppressed_for_small_pool() {
        let pool = create_verb_pool()[..2].to_vec();
        let mut rng = StdRng::seed_from_u64(42);

        let q = meaning_question(&pool[0], &pool, &GeneratorSettings::default(), &mut rng);
        assert!(q.is_none());
    }

    #[test]
    fn test_meaning_question_padding() {
        let pool = create_verb_pool()[..2].to_vec();
        let mut rng = StdRng::seed_from_u64(42);
        let settings = GeneratorSettings {
            pad_meaning_distractors: true,
            ..GeneratorSettings::default()
        };

        let q = meaning_question(&pool[0], &pool, &settings, &mut rng).unwrap();
        assert_eq!(q.options().len(), 4);
        assert_well_formed_choice(&q);
        let texts: Vec<&str> = q.options().iter().map(|o| o.text.as_str()).collect();
        assert!(texts.contains(&"đi bộ"));
        assert!(texts.contains(&"Nghĩa khác 2"));
        assert!(texts.contains(&"Nghĩa khác 3"));
    }

    #[test]
    fn test_meaning_question_requires_meaning() {
        let pool = vec![WordEntry::new(1, "run", WordType::Verb)];
        let mut rng = StdRng::seed_from_u64(0);
        let settings = GeneratorSettings {
            pad_meaning_distractors: true,
            ..GeneratorSettings::default()
        };
        assert!(meaning_question(&pool[0], &pool, &settings, &mut rng).is_none());
    }

    #[test]
    fn test_example_fill_question() {
        let word = WordEntry::new(1, "Run", WordType::Verb);
        let pattern = HeadwordPattern::new(&word.english).unwrap();
        let ex = example("I run every morning.");

        let q = example_fill_question(&word, &ex, &pattern).unwrap();
        assert_eq!(q.question, "Fill in the blank: I ____ every morning.");
        assert_eq!(q.correct_answer(), Some("run"));
        assert_eq!(
            q.answer,
            Answer::Fill {
                correct_answer: "run".to_string(),
                accepted_answers: vec!["run".to_string()],
            }
        );
        assert_eq!(q.explanation, "Complete sentence: I run every morning.");
        assert_eq!(q.translation_vi.as_deref(), Some("câu ví dụ"));
    }

    #[test]
    fn test_example_questions_need_headword_in_sentence() {
        let pool = create_verb_pool();
        let pattern = HeadwordPattern::new("run").unwrap();
        let ex = example("She is running late.");
        let mut rng = StdRng::seed_from_u64(0);

        assert!(example_fill_question(&pool[0], &ex, &pattern).is_none());
        assert!(example_mcq_question(&pool[0], &ex, &pattern, &pool, &mut rng).is_none());
    }

    #[test]
    fn test_example_mcq_question() {
        let pool = create_verb_pool();
        let pattern = HeadwordPattern::new("run").unwrap();
        let ex = example("I run every morning.");
        let mut rng = StdRng::seed_from_u64(3);

        let q = example_mcq_question(&pool[0], &ex, &pattern, &pool, &mut rng).unwrap();
        assert_eq!(q.question, "Choose the correct word: I ____ every morning.");
        assert_eq!(q.correct_answer(), Some("run"));
        assert_eq!(q.options().len(), 4);
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_example_mcq_needs_three_distractors() {
        let pool = create_verb_pool()[..3].to_vec();
        let pattern = HeadwordPattern::new("run").unwrap();
        let ex = example("I run every morning.");
        let mut rng = StdRng::seed_from_u64(3);

        assert!(example_mcq_question(&pool[0], &ex, &pattern, &pool, &mut rng).is_none());
    }

    #[test]
    fn test_collocation_mcq_question() {
        let mut pool = create_verb_pool();
        for (w, e) in pool
            .iter_mut()
            .zip(["run a race", "walk the dog", "swim laps", "jump rope"])
        {
            w.collocations = vec![collocation("verb + noun", e)];
        }
        let mut rng = StdRng::seed_from_u64(9);

        let q = collocation_mcq_question(&pool[0], &pool[0].collocations[0], &pool, &mut rng)
            .unwrap();
        assert_eq!(q.context.as_deref(), Some("Type: verb + noun"));
        assert_eq!(q.correct_answer(), Some("run a race"));
        assert_eq!(q.explanation, "Correct collocation: run a race");
        assert_eq!(q.translation_vi.as_deref(), Some("ví dụ"));
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_collocation_mcq_needs_three_distractors() {
        let mut pool = create_verb_pool();
        pool[0].collocations = vec![collocation("verb + noun", "run a race")];
        pool[1].collocations = vec![collocation("verb + noun", "walk the dog")];
        let mut rng = StdRng::seed_from_u64(9);

        let q = collocation_mcq_question(&pool[0], &pool[0].collocations[0], &pool, &mut rng);
        assert!(q.is_none());
    }

    #[test]
    fn test_collocation_fill_blanks_headword() {
        let word = WordEntry::new(1, "make", WordType::Verb);
        let q = collocation_fill_question(&word, &collocation("verb + noun", "Make a decision"))
            .unwrap();
        assert_eq!(q.question, "Complete the collocation: ____ a decision");
        assert_eq!(q.correct_answer(), Some("make"));
    }

    #[test]
    fn test_collocation_fill_falls_back_to_first_token() {
        let word = WordEntry::new(1, "decision", WordType::Noun);
        let q = collocation_fill_question(&word, &collocation("", "make decisions")).unwrap();
        assert_eq!(q.question, "Complete the collocation: ____ decisions");
        assert_eq!(q.correct_answer(), Some("make"));
        assert_eq!(q.context, None);
    }

    #[test]
    fn test_collocation_fill_needs_two_tokens() {
        let word = WordEntry::new(1, "hello", WordType::Interjection);
        assert!(collocation_fill_question(&word, &collocation("", "hello")).is_none());
    }

    #[test]
    fn test_common_mistake_question() {
        let word = WordEntry::new(1, "go", WordType::Verb);
        let mistake = CommonMistake {
            wrong: "I goed home.".to_string(),
            correct: "I went home.".to_string(),
            explanation: "go is irregular".to_string(),
        };
        let mut rng = StdRng::seed_from_u64(0);

        let q = common_mistake_question(&word, &mistake, &mut rng).unwrap();
        assert_eq!(q.options().len(), 2);
        assert_eq!(q.correct_answer(), Some("I went home."));
        assert_eq!(q.explanation, "go is irregular");
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_common_mistake_identical_sentences() {
        let word = WordEntry::new(1, "go", WordType::Verb);
        let mistake = CommonMistake {
            wrong: "I go.".to_string(),
            correct: "I go.".to_string(),
            explanation: String::new(),
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(common_mistake_question(&word, &mistake, &mut rng).is_none());
    }

    #[test]
    fn test_synonym_question() {
        let mut pool = create_verb_pool();
        pool[0].synonyms = vec!["sprint".to_string(), "jog".to_string()];
        pool.push(WordEntry::new(9, "sleep", WordType::Verb));
        let mut rng = StdRng::seed_from_u64(4);

        let q = synonym_question(&pool[0], &pool, &mut rng).unwrap();
        assert_eq!(q.correct_answer(), Some("sprint"));
        assert_eq!(q.explanation, "All synonyms: sprint, jog");
        assert_well_formed_choice(&q);
        assert!(!q.options().iter().any(|o| o.text == "jog"));
    }

    #[test]
    fn test_synonym_question_excludes_synonym_headwords() {
        let mut pool = create_verb_pool();
        // "walk" is listed as a synonym, leaving only two headword distractors
        pool[0].synonyms = vec!["walk".to_string()];
        let mut rng = StdRng::seed_from_u64(4);

        assert!(synonym_question(&pool[0], &pool, &mut rng).is_none());
    }

    #[test]
    fn test_odd_one_out_question() {
        let mut pool = create_verb_pool();
        pool[0].synonyms = vec![
            "sprint".to_string(),
            "jog".to_string(),
            "dash".to_string(),
            "race".to_string(),
        ];
        let mut rng = StdRng::seed_from_u64(8);

        let q = odd_one_out_question(&pool[0], &pool, &mut rng).unwrap();
        assert_eq!(q.options().len(), 4);
        let correct = q.correct_answer().unwrap();
        assert!(["walk", "swim", "jump"].contains(&correct));
        assert!(q.options().iter().all(|o| o.is_correct || pool[0].is_synonym(&o.text)));
        assert!(!q.options().iter().any(|o| o.text == "race"));
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_odd_one_out_requires_two_synonyms_and_same_type_word() {
        let mut pool = create_verb_pool();
        pool[0].synonyms = vec!["sprint".to_string()];
        let mut rng = StdRng::seed_from_u64(8);
        assert!(odd_one_out_question(&pool[0], &pool, &mut rng).is_none());

        let mut lonely = WordEntry::new(1, "happy", WordType::Adjective);
        lonely.synonyms = vec!["glad".to_string(), "joyful".to_string()];
        let pool = vec![lonely, WordEntry::new(2, "run", WordType::Verb)];
        assert!(odd_one_out_question(&pool[0], &pool, &mut rng).is_none());
    }

    fn adjective_pool(target_synonyms: &[&str]) -> Vec<WordEntry> {
        let mut happy = WordEntry::new(1, "happy", WordType::Adjective);
        happy.synonyms = target_synonyms.iter().map(|s| s.to_string()).collect();
        let mut pool = vec![happy];
        for (i, w) in ["glad", "sad", "angry", "tall", "small"].iter().enumerate() {
            pool.push(WordEntry::new(i as u64 + 2, *w, WordType::Adjective));
        }
        pool
    }

    fn count_text(q: &Question, text: &str) -> usize {
        q.options()
            .iter()
            .filter(|o| o.text.eq_ignore_ascii_case(text))
            .count()
    }

    #[test]
    fn test_collocation_mcq_with_padded_expression() {
        let mut make = WordEntry::new(1, "make", WordType::Verb);
        make.collocations = vec![collocation("verb + noun", "make money ")];
        let mut money = WordEntry::new(2, "money", WordType::Noun);
        money.collocations = vec![collocation("verb + noun", "make money")];
        let mut pool = vec![make, money];
        let others = [
            ("earn", "earn a living"),
            ("take", "take a photo"),
            ("have", "have lunch"),
        ];
        for (i, (w, e)) in others.into_iter().enumerate() {
            let mut entry = WordEntry::new(i as u64 + 3, w, WordType::Verb);
            entry.collocations = vec![collocation("verb + noun", e)];
            pool.push(entry);
        }

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let q = collocation_mcq_question(&pool[0], &pool[0].collocations[0], &pool, &mut rng)
                .unwrap();
            assert_eq!(q.correct_answer(), Some("make money"));
            assert_eq!(count_text(&q, "make money"), 1);
            assert_well_formed_choice(&q);
        }
    }

    #[test]
    fn test_synonym_question_with_padded_synonym() {
        let pool = adjective_pool(&[" glad", "cheerful"]);
        let mut rng = StdRng::seed_from_u64(2);

        let q = synonym_question(&pool[0], &pool, &mut rng).unwrap();
        assert_eq!(q.correct_answer(), Some("glad"));
        assert_eq!(count_text(&q, "glad"), 1);
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_synonym_question_ignores_case_of_synonym() {
        let pool = adjective_pool(&["Glad"]);
        let mut rng = StdRng::seed_from_u64(2);

        let q = synonym_question(&pool[0], &pool, &mut rng).unwrap();
        assert_eq!(q.correct_answer(), Some("Glad"));
        assert_eq!(count_text(&q, "glad"), 1);
        assert_well_formed_choice(&q);
    }

    #[test]
    fn test_odd_one_out_with_padded_and_cased_synonyms() {
        let pool = adjective_pool(&["tall ", "Glad", "GLAD"]);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let q = odd_one_out_question(&pool[0], &pool, &mut rng).unwrap();
            let correct = q.correct_answer().unwrap();
            assert!(["sad", "angry", "small"].contains(&correct), "picked {correct}");
            assert_eq!(q.options().len(), 3);
            assert_eq!(count_text(&q, "tall"), 1);
            assert_eq!(count_text(&q, "glad"), 1);
            assert_well_formed_choice(&q);
        }
    }
}
