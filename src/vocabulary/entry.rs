use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a word within its pool. Topic files use both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for WordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for WordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for WordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct WordIdVisitor;

        impl Visitor<'_> for WordIdVisitor {
            type Value = WordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer word id")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(WordId(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(WordId(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(WordId(value.to_string()))
            }
        }

        deserializer.deserialize_any(WordIdVisitor)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WordType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Pronoun,
    Interjection,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub en: String,
    #[serde(default)]
    pub vi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collocation {
    /// Category label such as "verb + noun"
    #[serde(rename = "type", default)]
    pub kind: String,
    pub expression: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub example_vi: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonMistake {
    pub wrong: String,
    pub correct: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Countability {
    #[serde(rename = "C")]
    Countable,
    #[serde(rename = "U")]
    Uncountable,
    #[serde(rename = "C/U")]
    Both,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NounInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countability: Option<Countability>,
}

/// Principal parts of a verb: base, past simple, past participle, present participle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IrregularForms {
    #[serde(default)]
    pub v1: String,
    #[serde(default)]
    pub v2: String,
    #[serde(default)]
    pub v3: String,
    #[serde(default)]
    pub ving: String,
}

/// One vocabulary item as supplied by the host's vocabulary store.
///
/// Optional fields gate which question kinds can be built for the word. The
/// meaning text is normalised while deserializing, so the legacy `meaningVi`
/// and `meaning` spellings only exist at this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawWordEntry")]
pub struct WordEntry {
    pub id: WordId,
    pub english: String,
    #[serde(rename = "type")]
    pub word_type: WordType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vietnamese_meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vietnamese_description: Option<String>,
    pub examples: Vec<Example>,
    pub collocations: Vec<Collocation>,
    pub common_mistakes: Vec<CommonMistake>,
    pub synonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noun: Option<NounInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irregular: Option<IrregularForms>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWordEntry {
    id: WordId,
    english: String,
    #[serde(rename = "type")]
    word_type: WordType,
    #[serde(default)]
    vietnamese_meaning: Option<String>,
    #[serde(default)]
    vietnamese_description: Option<String>,
    #[serde(default)]
    meaning_vi: Option<String>,
    #[serde(default)]
    meaning: Option<String>,
    #[serde(default)]
    examples: Vec<Example>,
    #[serde(default)]
    collocations: Vec<Collocation>,
    #[serde(default)]
    common_mistakes: Vec<CommonMistake>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    noun: Option<NounInfo>,
    #[serde(default)]
    irregular: Option<IrregularForms>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Whether two option texts read the same to a learner: surrounding
/// whitespace and letter case are ignored
pub fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl From<RawWordEntry> for WordEntry {
    fn from(raw: RawWordEntry) -> Self {
        let vietnamese_meaning = non_blank(raw.vietnamese_meaning)
            .or_else(|| non_blank(raw.meaning_vi))
            .or_else(|| non_blank(raw.meaning));
        Self {
            id: raw.id,
            english: raw.english.trim().to_string(),
            word_type: raw.word_type,
            vietnamese_meaning,
            vietnamese_description: non_blank(raw.vietnamese_description),
            examples: raw.examples,
            collocations: raw
                .collocations
                .into_iter()
                .map(|mut c| {
                    c.expression = c.expression.trim().to_string();
                    c
                })
                .collect(),
            common_mistakes: raw.common_mistakes,
            synonyms: raw
                .synonyms
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            noun: raw.noun,
            irregular: raw.irregular,
        }
    }
}

impl WordEntry {
    /// Bare entry with no optional data, mostly useful for building pools in code
    pub fn new(id: impl Into<WordId>, english: impl Into<String>, word_type: WordType) -> Self {
        Self {
            id: id.into(),
            english: english.into(),
            word_type,
            vietnamese_meaning: None,
            vietnamese_description: None,
            examples: Vec::new(),
            collocations: Vec::new(),
            common_mistakes: Vec::new(),
            synonyms: Vec::new(),
            noun: None,
            irregular: None,
        }
    }

    /// Meaning shown to the learner: the description wins over the short meaning
    pub fn meaning_text(&self) -> Option<&str> {
        self.vietnamese_description
            .as_deref()
            .or(self.vietnamese_meaning.as_deref())
    }

    pub fn is_well_formed(&self) -> bool {
        !self.english.trim().is_empty()
    }

    pub fn is_synonym(&self, candidate: &str) -> bool {
        self.synonyms.iter().any(|s| same_text(s, candidate))
    }

    pub fn has_collocations(&self) -> bool {
        !self.collocations.is_empty()
    }

    /// Whether `expression` is one of this entry's own collocations
    pub fn owns_collocation(&self, expression: &str) -> bool {
        self.collocations
            .iter()
            .any(|c| same_text(&c.expression, expression))
    }
}
