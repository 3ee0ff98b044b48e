//! Ask questions from shell scripts and remember the answers.
//!
//! Prompts go to stderr and answers to stdout, so a script can capture them:
//!
//! ```bash
//! name=$(askwiz --history answers.json ask "Your name?" --name name)
//! if askwiz --history answers.json confirm "Deploy now?" --default no; then ...; fi
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use askwiz::core::history::HistoryNode;
use askwiz::exit_codes;
use askwiz::io::config::{DEFAULT_CONFIG_FILE, load_config};
use askwiz::io::history_store::load_history;
use askwiz::logging;
use askwiz::{ChoiceOptions, Question, Wizard};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "askwiz",
    version,
    about = "Ask questions from shell scripts and remember the answers"
)]
struct Cli {
    /// Config file (TOML); ignored when missing.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(flatten)]
    session: SessionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct SessionArgs {
    /// History file providing defaults and receiving answers.
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Load an existing history file without asking first.
    #[arg(long, global = true)]
    load: bool,

    /// Context to ask the question in; repeat to nest.
    #[arg(long = "context", value_name = "NAME", global = true)]
    contexts: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a free-text question and print the answer.
    Ask {
        question: String,
        /// Name the answer is stored under.
        #[arg(long)]
        name: Option<String>,
        /// Answer used when the input is blank.
        #[arg(long)]
        default: Option<String>,
        /// Accept a blank answer.
        #[arg(long)]
        optional: bool,
    },
    /// Ask a yes/no question; exits 0 for yes and 2 for no.
    Confirm {
        question: String,
        /// Name the answer is stored under.
        #[arg(long)]
        name: Option<String>,
        /// Answer used when the input is blank (yes or no).
        #[arg(long, value_parser = parse_yes_no)]
        default: Option<bool>,
    },
    /// Ask the user to pick an option and print its code.
    Choose {
        question: String,
        /// Options in menu order.
        #[arg(required = true)]
        options: Vec<String>,
        /// Options are given as `code=display`.
        #[arg(long)]
        keyed: bool,
        /// Name the answer is stored under.
        #[arg(long)]
        name: Option<String>,
        /// Code of the option used when the input is blank.
        #[arg(long)]
        default: Option<String>,
        /// Accept a blank answer.
        #[arg(long)]
        optional: bool,
    },
    /// Print every answer stored in a history file.
    Show { history: PathBuf },
    /// Check a history file against the schema and loader rules.
    Validate { history: PathBuf },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Ask {
            question,
            name,
            default,
            optional,
        } => {
            let mut question = named_question(question, name).required(!optional);
            if let Some(default) = default {
                question = question.default_answer(default);
            }
            cmd_ask(&cli.config, &cli.session, question)
        }
        Command::Confirm {
            question,
            name,
            default,
        } => {
            let mut question = named_question(question, name);
            if let Some(default) = default {
                question = question.yes_no_default(default);
            }
            cmd_confirm(&cli.config, &cli.session, question)
        }
        Command::Choose {
            question,
            options,
            keyed,
            name,
            default,
            optional,
        } => {
            let options = parse_options(options, keyed)?;
            let mut question = named_question(question, name).required(!optional);
            if let Some(default) = default {
                question = question.default_answer(default);
            }
            cmd_choose(&cli.config, &cli.session, question, &options)
        }
        Command::Show { history } => cmd_show(&history),
        Command::Validate { history } => cmd_validate(&history),
    }
}

fn cmd_ask(config: &Path, session: &SessionArgs, question: Question<'_>) -> Result<i32> {
    let mut wizard = open_session(config, session)?;
    let answer = wizard.ask(question)?;
    close_session(&mut wizard, session)?;
    println!("{}", render_answer(&answer));
    Ok(exit_codes::OK)
}

fn cmd_confirm(config: &Path, session: &SessionArgs, question: Question<'_>) -> Result<i32> {
    let mut wizard = open_session(config, session)?;
    let confirmed = wizard.ask_yes_no(question)?;
    close_session(&mut wizard, session)?;
    Ok(if confirmed {
        exit_codes::OK
    } else {
        exit_codes::DECLINED
    })
}

fn cmd_choose(
    config: &Path,
    session: &SessionArgs,
    question: Question<'_>,
    options: &ChoiceOptions,
) -> Result<i32> {
    let mut wizard = open_session(config, session)?;
    let choice = wizard.ask_choice(question, options)?;
    close_session(&mut wizard, session)?;
    println!("{}", choice.unwrap_or_default());
    Ok(exit_codes::OK)
}

fn cmd_show(history: &Path) -> Result<i32> {
    let document = load_history(history)?;
    let mut lines = Vec::new();
    collect_answers(&document.questions, "", &mut lines);
    for line in lines {
        println!("{line}");
    }
    Ok(exit_codes::OK)
}

fn cmd_validate(history: &Path) -> Result<i32> {
    let document = load_history(history)?;
    println!(
        "ok: {} ({} top-level entries)",
        history.display(),
        document.questions.len()
    );
    Ok(exit_codes::OK)
}

fn open_session(config: &Path, session: &SessionArgs) -> Result<Wizard> {
    let mut cfg = load_config(config)?;
    if let Some(history) = &session.history {
        cfg.history.path = Some(history.clone());
    }
    if session.load {
        cfg.history.load_if_exists = true;
    }
    let mut wizard = Wizard::from_config(&cfg)?;
    for context in &session.contexts {
        wizard.enter_context(context)?;
    }
    Ok(wizard)
}

fn close_session(wizard: &mut Wizard, session: &SessionArgs) -> Result<()> {
    for context in session.contexts.iter().rev() {
        wizard.exit_context(Some(context))?;
    }
    Ok(())
}

fn named_question<'a>(question: String, name: Option<String>) -> Question<'a> {
    let question = Question::new(question);
    match name {
        Some(name) => question.name(name),
        None => question,
    }
}

/// Options from the command line, as `code=display` pairs when `keyed`.
fn parse_options(options: Vec<String>, keyed: bool) -> Result<ChoiceOptions> {
    if !keyed {
        return Ok(ChoiceOptions::Values(options));
    }
    let mut pairs = Vec::with_capacity(options.len());
    for option in options {
        let Some((code, display)) = option.split_once('=') else {
            bail!("option '{option}' is not of the form code=display");
        };
        pairs.push((code.to_string(), display.to_string()));
    }
    Ok(ChoiceOptions::Pairs(pairs))
}

fn parse_yes_no(raw: &str) -> Result<bool, String> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(format!("expected yes or no, got '{other}'")),
    }
}

fn render_answer(answer: &Value) -> String {
    match answer {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Flatten a history tree into `path/to/name = answer` lines.
fn collect_answers(nodes: &BTreeMap<String, HistoryNode>, parent: &str, lines: &mut Vec<String>) {
    for (name, node) in nodes {
        let path = if parent.is_empty() {
            name.clone()
        } else {
            format!("{parent}/{name}")
        };
        match node {
            HistoryNode::Question { answer } => {
                lines.push(format!("{path} = {}", answer.as_deref().unwrap_or("null")));
            }
            HistoryNode::Context { questions } => collect_answers(questions, &path, lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ask_with_nested_contexts() {
        let cli = Cli::parse_from([
            "askwiz",
            "ask",
            "Email?",
            "--context",
            "team",
            "--context",
            "alice",
            "--name",
            "email",
        ]);
        assert_eq!(cli.session.contexts, vec!["team", "alice"]);
        let Command::Ask { name, .. } = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(name.as_deref(), Some("email"));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn session_flags_before_subcommand() {
        let cli = Cli::parse_from([
            "askwiz",
            "--history",
            "answers.json",
            "--load",
            "confirm",
            "Go?",
        ]);
        assert_eq!(cli.session.history, Some(PathBuf::from("answers.json")));
        assert!(cli.session.load);
    }

    #[test]
    fn parse_confirm_default() {
        let cli = Cli::parse_from(["askwiz", "confirm", "Go?", "--default", "No"]);
        assert!(matches!(
            cli.command,
            Command::Confirm {
                default: Some(false),
                ..
            }
        ));
    }

    #[test]
    fn parse_choose_requires_options() {
        assert!(Cli::try_parse_from(["askwiz", "choose", "Color?"]).is_err());
    }

    #[test]
    fn keyed_options_split_on_equals() {
        let options = parse_options(vec!["r=Red".to_string(), "g=Dark=Green".to_string()], true)
            .expect("parse");
        assert_eq!(
            options,
            ChoiceOptions::pairs([("r", "Red"), ("g", "Dark=Green")])
        );
        assert!(parse_options(vec!["Red".to_string()], true).is_err());
    }

    #[test]
    fn collect_answers_flattens_contexts() {
        let mut questions = BTreeMap::new();
        questions.insert(
            "name".to_string(),
            HistoryNode::Question {
                answer: Some("Alice".to_string()),
            },
        );
        questions.insert(
            "team".to_string(),
            HistoryNode::Context {
                questions: [("lead".to_string(), HistoryNode::Question { answer: None })]
                    .into_iter()
                    .collect(),
            },
        );
        let mut lines = Vec::new();
        collect_answers(&questions, "", &mut lines);
        assert_eq!(lines, vec!["name = Alice", "team/lead = null"]);
    }

    #[test]
    fn render_answer_prints_strings_bare() {
        assert_eq!(render_answer(&Value::String("x".to_string())), "x");
        assert_eq!(render_answer(&Value::Null), "");
        assert_eq!(render_answer(&Value::Bool(true)), "true");
    }
}
