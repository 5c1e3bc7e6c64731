use super::entry::{WordEntry, WordId};
use crate::error::VocabularyError;
use include_dir::{include_dir, Dir};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

static TOPIC_DIR: Dir = include_dir!("src/topics");

/// A named vocabulary list; one topic is the usual word pool for a quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<WordId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_vi: Option<String>,
    pub vocabulary: Vec<WordEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTopic {
    #[serde(default)]
    id: Option<WordId>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    name_vi: Option<String>,
    #[serde(default)]
    vocabulary: Vec<serde_json::Value>,
}

impl Topic {
    /// Parse a topic document. Entries that do not match the word schema are
    /// dropped individually so one bad word does not hide the whole topic.
    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let raw: RawTopic = serde_json::from_str(json)?;
        let total = raw.vocabulary.len();

        let vocabulary: Vec<WordEntry> = raw
            .vocabulary
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| match serde_json::from_value::<WordEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping vocabulary entry {idx} in topic '{}': {e}", raw.name);
                    None
                }
            })
            .collect();

        debug!(
            "loaded topic '{}' with {}/{} entries",
            raw.name,
            vocabulary.len(),
            total
        );

        Ok(Self {
            id: raw.id,
            name: raw.name,
            name_vi: raw.name_vi,
            vocabulary,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name_vi.as_deref().unwrap_or(&self.name)
    }
}

pub fn load_topic_file<P: AsRef<Path>>(path: P) -> Result<Topic, VocabularyError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| VocabularyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Topic::from_json(&content)
}

/// Topics compiled into the binary, addressed by file stem
pub fn builtin_topic(name: &str) -> Result<Topic, VocabularyError> {
    let file = TOPIC_DIR
        .get_file(format!("{name}.json"))
        .ok_or_else(|| VocabularyError::TopicNotFound(name.to_string()))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| VocabularyError::Encoding(name.to_string()))?;

    Topic::from_json(contents)
}

pub fn builtin_topic_names() -> Vec<String> {
    let mut names: Vec<String> = TOPIC_DIR
        .files()
        .filter(|f| f.path().extension().and_then(|e| e.to_str()) == Some("json"))
        .filter_map(|f| f.path().file_stem().and_then(|s| s.to_str()).map(String::from))
        .collect();
    names.sort();
    names
}
