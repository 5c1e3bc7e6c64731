use super::builder::choice_answer;
use super::question::{Answer, ChoiceOption, Question, QuestionKind};
use crate::shuffle::shuffle_owned;
use crate::vocabulary::{Countability, IrregularForms, WordEntry, WordType};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::RngCore;

const COUNTABLE: &str = "Countable";
const UNCOUNTABLE: &str = "Uncountable";
const BOTH: &str = "Both countable and uncountable";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum VerbForm {
    PastSimple,
    PastParticiple,
    PresentParticiple,
}

fn form_of(forms: &IrregularForms, form: VerbForm) -> &str {
    match form {
        VerbForm::PastSimple => forms.v2.trim(),
        VerbForm::PastParticiple => forms.v3.trim(),
        VerbForm::PresentParticiple => forms.ving.trim(),
    }
}

struct TenseScenario {
    sentence: &'static str,
    form: VerbForm,
    explanation: &'static str,
}

static TENSE_SCENARIOS: [TenseScenario; 3] = [
    TenseScenario {
        sentence: "Yesterday, I ____ to the store.",
        form: VerbForm::PastSimple,
        explanation: "Past simple requires V2 form",
    },
    TenseScenario {
        sentence: "I have ____ there many times.",
        form: VerbForm::PastParticiple,
        explanation: "Present perfect requires V3 form (past participle)",
    },
    TenseScenario {
        sentence: "I am ____ now.",
        form: VerbForm::PresentParticiple,
        explanation: "Present continuous requires V-ing form",
    },
];

/// Distinct non-empty principal parts in v1, v2, v3, v-ing order
fn distinct_forms(forms: &IrregularForms) -> Vec<&str> {
    [&forms.v1, &forms.v2, &forms.v3, &forms.ving]
        .into_iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .unique()
        .collect()
}

/// Options are every distinct form; exactly one matches the asked form
fn verb_form_answer(forms: &[&str], correct: &str, rng: &mut dyn RngCore) -> Answer {
    let options: Vec<ChoiceOption> = forms
        .iter()
        .map(|f| ChoiceOption {
            text: f.to_string(),
            is_correct: *f == correct,
        })
        .collect();
    Answer::Choice {
        options: shuffle_owned(options, rng),
    }
}

fn verb_forms(word: &WordEntry) -> Option<&IrregularForms> {
    if word.word_type != WordType::Verb {
        return None;
    }
    word.irregular.as_ref()
}

pub fn noun_countability_question(word: &WordEntry, rng: &mut dyn RngCore) -> Option<Question> {
    if word.word_type != WordType::Noun {
        return None;
    }
    let noun = word.noun.as_ref()?;
    let countability = noun.countability?;
    let english = &word.english;

    let (correct, explanation) = match countability {
        Countability::Countable => {
            let plural = noun
                .plural
                .clone()
                .unwrap_or_else(|| format!("{english}s"));
            (
                COUNTABLE,
                format!("\"{english}\" is countable. You can say: a {english}, two {plural}"),
            )
        }
        Countability::Uncountable => (
            UNCOUNTABLE,
            format!("\"{english}\" is uncountable. You say: some {english}, much {english}"),
        ),
        Countability::Both => (
            BOTH,
            format!("\"{english}\" can be both countable and uncountable depending on context"),
        ),
    };

    let distractors = [COUNTABLE, UNCOUNTABLE, BOTH]
        .into_iter()
        .filter(|label| *label != correct)
        .map(String::from)
        .collect();

    Some(Question {
        kind: QuestionKind::NounCountability,
        word: english.clone(),
        question: format!("Is \"{english}\" countable or uncountable?"),
        context: None,
        answer: choice_answer(correct, distractors, rng),
        explanation,
        translation_vi: None,
    })
}

/// Regular-looking but wrong plurals of `singular`, never equal to `plural`
fn wrong_plurals(singular: &str, plural: &str) -> Vec<String> {
    let ies = match singular.strip_suffix('y') {
        Some(stem) => format!("{stem}ies"),
        None => format!("{singular}ies"),
    };
    let mut wrong: Vec<String> = [format!("{singular}s"), format!("{singular}es"), ies]
        .into_iter()
        .filter(|w| w != plural)
        .unique()
        .collect();

    if wrong.len() < 2 {
        for extra in [singular.to_string(), format!("{singular}en")] {
            if extra != plural && !wrong.contains(&extra) {
                wrong.push(extra);
            }
        }
    }
    wrong.truncate(3);
    wrong
}

pub fn noun_plural_question(word: &WordEntry, rng: &mut dyn RngCore) -> Option<Question> {
    if word.word_type != WordType::Noun {
        return None;
    }
    let noun = word.noun.as_ref()?;
    if !matches!(
        noun.countability,
        Some(Countability::Countable | Countability::Both)
    ) {
        return None;
    }
    let plural = noun.plural.as_deref().map(str::trim).filter(|p| !p.is_empty())?;
    let singular = noun
        .singular
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| word.english.trim());

    let distractors = wrong_plurals(singular, plural);
    if distractors.is_empty() {
        return None;
    }

    Some(Question {
        kind: QuestionKind::NounPlural,
        word: word.english.clone(),
        question: format!("What is the plural form of \"{singular}\"?"),
        context: None,
        answer: choice_answer(plural, distractors, rng),
        explanation: format!("The plural of \"{singular}\" is \"{plural}\""),
        translation_vi: None,
    })
}

pub fn verb_form_tense_question(word: &WordEntry, rng: &mut dyn RngCore) -> Option<Question> {
    let forms = verb_forms(word)?;
    let options = distinct_forms(forms);
    if options.len() < 3 {
        return None;
    }

    let scenario = TENSE_SCENARIOS.choose(rng)?;
    let correct = form_of(forms, scenario.form);
    if correct.is_empty() {
        return None;
    }

    Some(Question {
        kind: QuestionKind::VerbFormTense,
        word: word.english.clone(),
        question: scenario.sentence.to_string(),
        context: None,
        answer: verb_form_answer(&options, correct, rng),
        explanation: scenario.explanation.to_string(),
        translation_vi: None,
    })
}

pub fn verb_form_mcq_question(word: &WordEntry, rng: &mut dyn RngCore) -> Option<Question> {
    let forms = verb_forms(word)?;
    let options = distinct_forms(forms);
    if options.len() < 3 {
        return None;
    }

    let form = *[VerbForm::PastSimple, VerbForm::PastParticiple].choose(rng)?;
    let correct = form_of(forms, form);
    if correct.is_empty() {
        return None;
    }
    let base = if forms.v1.trim().is_empty() {
        word.english.trim()
    } else {
        forms.v1.trim()
    };
    let question = match form {
        VerbForm::PastSimple => format!("What is the past simple (V2) form of \"{base}\"?"),
        _ => format!("What is the past participle (V3) form of \"{base}\"?"),
    };

    Some(Question {
        kind: QuestionKind::VerbFormMcq,
        word: word.english.clone(),
        question,
        context: None,
        answer: verb_form_answer(&options, correct, rng),
        explanation: format!(
            "Forms: V1={}, V2={}, V3={}, V-ing={}",
            forms.v1, forms.v2, forms.v3, forms.ving
        ),
        translation_vi: None,
    })
}
