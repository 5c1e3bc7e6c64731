pub mod entry;
pub mod topic;

pub use entry::{
    Collocation, CommonMistake, Countability, Example, IrregularForms, Level, NounInfo, WordEntry,
    WordId, WordType,
};
pub use topic::{builtin_topic, builtin_topic_names, load_topic_file, Topic};
