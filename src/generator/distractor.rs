use crate::shuffle::shuffle_owned;
use crate::vocabulary::entry::same_text;
use crate::vocabulary::WordEntry;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Strategy for picking wrong-but-plausible options for one question category.
///
/// Implementations return at most `count` distinct strings, none equal to the
/// target's own correct value. Returning fewer is how a sampler signals that the
/// pool is too small; callers decide whether that suppresses the question.
pub trait DistractorSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String>;
}

/// Other entries in the pool, same part of speech first, each group shuffled
fn ranked_others<'a>(
    target: &WordEntry,
    pool: &'a [WordEntry],
    rng: &mut dyn RngCore,
) -> Vec<&'a WordEntry> {
    let (same, rest): (Vec<&WordEntry>, Vec<&WordEntry>) = pool
        .iter()
        .filter(|w| w.id != target.id)
        .partition(|w| w.word_type == target.word_type);

    let mut ranked = shuffle_owned(same, rng);
    ranked.extend(shuffle_owned(rest, rng));
    ranked
}

/// Trimmed, non-empty candidates that differ from every excluded text, at most
/// `count` of them, deduplicated ignoring case
fn distinct_texts<'a>(
    candidates: impl Iterator<Item = &'a str>,
    excluded: impl Fn(&str) -> bool,
    count: usize,
) -> Vec<String> {
    candidates
        .map(str::trim)
        .filter(|text| !text.is_empty() && !excluded(text))
        .unique_by(|text| text.to_lowercase())
        .take(count)
        .map(String::from)
        .collect()
}

/// Other entries' meaning texts
pub struct MeaningSampler;

impl DistractorSampler for MeaningSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let correct = target.meaning_text().unwrap_or_default();
        distinct_texts(
            ranked_others(target, pool, rng)
                .into_iter()
                .filter_map(WordEntry::meaning_text),
            |meaning| same_text(meaning, correct),
            count,
        )
    }
}

/// Other entries' headwords, used for example sentences
pub struct HeadwordSampler;

impl DistractorSampler for HeadwordSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        distinct_texts(
            ranked_others(target, pool, rng)
                .into_iter()
                .map(|w| w.english.as_str()),
            |english| same_text(english, &target.english),
            count,
        )
    }
}

/// One random collocation expression from each other entry that has any
pub struct CollocationSampler;

impl DistractorSampler for CollocationSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let picked: Vec<&str> = ranked_others(target, pool, rng)
            .into_iter()
            .filter_map(|w| w.collocations.choose(&mut *rng))
            .map(|c| c.expression.as_str())
            .collect();

        // Any of the target's own expressions would be a second correct answer
        distinct_texts(
            picked.into_iter(),
            |expression| target.owns_collocation(expression),
            count,
        )
    }
}

/// Headwords that are neither the target nor one of its synonyms
pub struct SynonymSampler;

impl DistractorSampler for SynonymSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        distinct_texts(
            ranked_others(target, pool, rng)
                .into_iter()
                .map(|w| w.english.as_str()),
            |english| same_text(english, &target.english) || target.is_synonym(english),
            count,
        )
    }
}

/// Same part of speech but not a synonym: the odd one out among the synonyms
pub struct UnrelatedSampler;

impl DistractorSampler for UnrelatedSampler {
    fn sample(
        &self,
        target: &WordEntry,
        pool: &[WordEntry],
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<String> {
        let candidates = distinct_texts(
            pool.iter()
                .filter(|w| w.id != target.id && w.word_type == target.word_type)
                .map(|w| w.english.as_str()),
            |english| same_text(english, &target.english) || target.is_synonym(english),
            usize::MAX,
        );

        shuffle_owned(candidates, rng)
            .into_iter()
            .take(count)
            .collect()
    }
}
