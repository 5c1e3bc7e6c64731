use std::path::PathBuf;

/// Failures while locating or parsing vocabulary topics
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("topic '{0}' not found")]
    TopicNotFound(String),
    #[error("unable to read topic file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse topic: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedded topic '{0}' is not valid UTF-8")]
    Encoding(String),
}

/// Misuse of a quiz session by the presentation layer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("topic has no vocabulary")]
    EmptyTopic,
    #[error("no questions could be generated")]
    NoQuestions,
    #[error("session is already finished")]
    Finished,
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("answer must not be empty")]
    EmptyAnswer,
    #[error("option {index} is out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("answer does not match the question shape")]
    WrongAnswerShape,
}
