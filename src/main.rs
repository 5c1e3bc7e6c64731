use clap::{Parser, Subcommand, ValueEnum};
use lexiquiz::{
    config::{Config, ConfigStore, FileConfigStore},
    generator::{generate_mixed_questions_with, Answer, GeneratorSettings, QuestionKind},
    session::{AnswerRecord, GameSession},
    vocabulary::{builtin_topic, builtin_topic_names, load_topic_file, Topic},
    SessionError,
};
use log::debug;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
};

/// mixed vocabulary quizzes for English learners
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Generates mixed vocabulary quizzes (meaning, examples, collocations, synonyms, grammar) from topic word lists and plays them in the terminal."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// embedded topic to quiz on (defaults to the configured topic)
    #[clap(short = 't', long, global = true)]
    topic: Option<String>,

    /// load the topic from a JSON file instead of the embedded topics
    #[clap(short = 'f', long, global = true)]
    file: Option<PathBuf>,

    /// seed for a reproducible quiz
    #[clap(short = 's', long, global = true)]
    seed: Option<u64>,

    /// pad meaning questions with placeholder options when the topic is small
    #[clap(long, global = true, overrides_with = "no_pad_meanings")]
    pad_meanings: bool,

    /// never pad meaning questions, even if the stored config does
    #[clap(long, global = true, overrides_with = "pad_meanings")]
    no_pad_meanings: bool,

    /// only generate these question kinds (repeatable)
    #[clap(short = 'k', long = "kind", value_enum, global = true)]
    kinds: Vec<KindArg>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// list the embedded topics
    Topics,
    /// print the generated questions as JSON
    Generate,
    /// play a quiz in the terminal (default)
    Play,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum KindArg {
    Meaning,
    ExampleFill,
    ExampleMcq,
    CollocationMcq,
    CollocationFill,
    CommonMistake,
    Synonym,
    OddOneOut,
    NounCountability,
    NounPlural,
    VerbFormTense,
    VerbFormMcq,
}

impl From<KindArg> for QuestionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Meaning => QuestionKind::Meaning,
            KindArg::ExampleFill => QuestionKind::ExampleFill,
            KindArg::ExampleMcq => QuestionKind::ExampleMcq,
            KindArg::CollocationMcq => QuestionKind::CollocationMcq,
            KindArg::CollocationFill => QuestionKind::CollocationFill,
            KindArg::CommonMistake => QuestionKind::CommonMistake,
            KindArg::Synonym => QuestionKind::Synonym,
            KindArg::OddOneOut => QuestionKind::OddOneOut,
            KindArg::NounCountability => QuestionKind::NounCountability,
            KindArg::NounPlural => QuestionKind::NounPlural,
            KindArg::VerbFormTense => QuestionKind::VerbFormTense,
            KindArg::VerbFormMcq => QuestionKind::VerbFormMcq,
        }
    }
}

impl Cli {
    /// Layer command-line flags over the stored configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if self.pad_meanings {
            config.pad_meaning_distractors = true;
        } else if self.no_pad_meanings {
            config.pad_meaning_distractors = false;
        }
        if !self.kinds.is_empty() {
            config.enabled_kinds = self.kinds.iter().map(|k| QuestionKind::from(*k)).collect();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(topic) = &self.topic {
            config.default_topic = topic.clone();
        }
        config
    }

    fn load_topic(&self, config: &Config) -> Result<Topic, Box<dyn Error>> {
        let topic = match &self.file {
            Some(path) => load_topic_file(path)?,
            None => builtin_topic(&config.default_topic)?,
        };
        debug!(
            "loaded topic '{}' with {} words",
            topic.name,
            topic.vocabulary.len()
        );
        Ok(topic)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    let settings = GeneratorSettings::from(&config);

    let mut rng: Box<dyn RngCore> = match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Play) {
        Command::Topics => {
            for name in builtin_topic_names() {
                let topic = builtin_topic(&name)?;
                writeln!(
                    out,
                    "{:<16} {} ({} words)",
                    name,
                    topic.display_name(),
                    topic.vocabulary.len()
                )?;
            }
        }
        Command::Generate => {
            let topic = cli.load_topic(&config)?;
            let questions =
                generate_mixed_questions_with(&topic.vocabulary, &settings, rng.as_mut());
            writeln!(out, "{}", serde_json::to_string_pretty(&questions)?)?;
        }
        Command::Play => {
            let topic = cli.load_topic(&config)?;
            let mut session = GameSession::start(&topic, &settings, rng.as_mut())?;
            let stdin = io::stdin();
            play(&mut session, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

/// Line-oriented quiz loop: numbers pick options, anything else is a typed answer
fn play<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "Topic: {}", session.topic_name())?;
    let mut lines = input.lines();

    while let Some(question) = session.current().cloned() {
        let progress = session.progress();
        writeln!(out)?;
        writeln!(
            out,
            "[{}/{}] {}",
            progress.current, progress.total, question.kind
        )?;
        if question.kind.shows_word_label() {
            writeln!(out, "Word: {}", question.word)?;
        }
        writeln!(out, "{}", question.question)?;
        if let Some(context) = &question.context {
            writeln!(out, "  ({})", context)?;
        }
        if let Answer::Choice { options } = &question.answer {
            for (i, option) in options.iter().enumerate() {
                writeln!(out, "  {}. {}", i + 1, option.text)?;
            }
        }

        let record = loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let line = line?;
            if line.trim() == "q" {
                return Ok(());
            }

            let attempt = match &question.answer {
                Answer::Choice { options } => match line.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => session.answer_choice(n - 1),
                    _ => Err(SessionError::OptionOutOfRange {
                        index: 0,
                        len: options.len(),
                    }),
                },
                Answer::Fill { .. } => session.answer_fill(&line),
            };

            match attempt {
                Ok(record) => break record,
                Err(SessionError::OptionOutOfRange { len, .. }) => {
                    writeln!(out, "Enter a number between 1 and {}", len)?;
                }
                Err(SessionError::EmptyAnswer) => writeln!(out, "Type an answer")?,
                Err(e) => return Err(e.into()),
            }
        };

        print_feedback(
            out,
            &record,
            &question.explanation,
            question.translation_vi.as_deref(),
        )?;
        session.advance()?;
    }

    let summary = session.summary();
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({}%)",
        summary.score, summary.total, summary.percentage
    )?;
    let stars = usize::from(summary.stars);
    writeln!(out, "{}{}", "★".repeat(stars), "☆".repeat(3 - stars))?;
    writeln!(out, "{}", summary.message)?;
    Ok(())
}

fn print_feedback<W: Write>(
    out: &mut W,
    record: &AnswerRecord,
    explanation: &str,
    translation_vi: Option<&str>,
) -> io::Result<()> {
    if record.is_correct {
        writeln!(out, "✓ Correct!")?;
    } else {
        writeln!(out, "✗ Wrong. Answer: {}", record.correct_answer)?;
    }
    if !explanation.is_empty() {
        writeln!(out, "  {}", explanation)?;
    }
    if let Some(vi) = translation_vi {
        writeln!(out, "  {}", vi)?;
    }
    Ok(())
}
