//! Durable form of the answer store.
//!
//! ```json
//! {
//!   "questions": {
//!     "name": {"type": "question", "answer": "raw text"},
//!     "team": {"type": "context", "questions": {"lead": {"type": "question", "answer": null}}}
//!   }
//! }
//! ```
//!
//! Only raw answers are kept; validated values are rebuilt by asking again.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::core::error::WizardError;
use crate::store::{Context, Entry, QuestionRecord};

/// Root of a history file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryDocument {
    pub questions: BTreeMap<String, HistoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryNode {
    Question {
        answer: Option<String>,
    },
    Context {
        questions: BTreeMap<String, HistoryNode>,
    },
}

impl HistoryDocument {
    /// Snapshot the raw answers held by `root`.
    pub fn from_context(root: &Context) -> Self {
        Self {
            questions: snapshot(root),
        }
    }

    /// Parse a history document from JSON.
    ///
    /// A missing `questions` key is an empty document. Files whose root
    /// `questions` is itself a `{"type": "context", ...}` node use an older
    /// layout and are rejected as malformed.
    pub fn from_value(value: &Value) -> Result<Self, WizardError> {
        let root = value
            .as_object()
            .ok_or_else(|| malformed("", "root must be an object"))?;
        let questions = match root.get("questions") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(questions)) => parse_children(questions, "")?,
            Some(_) => return Err(malformed("", "'questions' must be an object")),
        };
        Ok(Self { questions })
    }

    /// Merge this document into `root`.
    ///
    /// Records not asked in this session take the history answer. Contexts are
    /// extended, never replaced. Entries used in this session win over history
    /// nodes of the other kind.
    pub fn merge_into(&self, root: &mut Context) {
        merge_children(&self.questions, root, "");
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn snapshot(context: &Context) -> BTreeMap<String, HistoryNode> {
    context
        .entries
        .iter()
        .map(|(name, entry)| {
            let node = match entry {
                Entry::Question(record) => HistoryNode::Question {
                    answer: record.prior_answer.clone(),
                },
                Entry::Context(child) => HistoryNode::Context {
                    questions: snapshot(child),
                },
            };
            (name.clone(), node)
        })
        .collect()
}

fn parse_children(
    questions: &Map<String, Value>,
    parent: &str,
) -> Result<BTreeMap<String, HistoryNode>, WizardError> {
    questions
        .iter()
        .map(|(name, node)| {
            let path = join_path(parent, name);
            let node = parse_node(node, &path)?;
            Ok((name.clone(), node))
        })
        .collect()
}

fn parse_node(value: &Value, path: &str) -> Result<HistoryNode, WizardError> {
    let node = value
        .as_object()
        .ok_or_else(|| malformed(path, "node must be an object"))?;
    let type_code = node
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(path, "node is missing a string 'type'"))?;
    match type_code {
        "question" => {
            let answer = match node.get("answer") {
                None | Some(Value::Null) => None,
                Some(Value::String(answer)) => Some(answer.clone()),
                Some(_) => return Err(malformed(path, "'answer' must be a string or null")),
            };
            Ok(HistoryNode::Question { answer })
        }
        "context" => {
            let questions = node
                .get("questions")
                .and_then(Value::as_object)
                .ok_or_else(|| malformed(path, "context is missing a 'questions' object"))?;
            Ok(HistoryNode::Context {
                questions: parse_children(questions, path)?,
            })
        }
        other => Err(WizardError::UnknownHistoryFormat {
            type_code: other.to_string(),
            path: path.to_string(),
        }),
    }
}

fn merge_children(nodes: &BTreeMap<String, HistoryNode>, context: &mut Context, parent: &str) {
    for (name, node) in nodes {
        let path = join_path(parent, name);
        match node {
            HistoryNode::Question { answer } => merge_question(context, name, answer, &path),
            HistoryNode::Context { questions } => {
                if let Some(child) = merge_context(context, name, &path) {
                    merge_children(questions, child, &path);
                }
            }
        }
    }
}

fn merge_question(context: &mut Context, name: &str, answer: &Option<String>, path: &str) {
    if let Some(record) = context.record_mut(name) {
        if !record.asked {
            record.prior_answer = answer.clone();
        }
        return;
    }
    if context.child(name).is_some_and(|child| child.opened) {
        warn!(path, "history question shadowed by an open context; skipped");
        return;
    }
    context.entries.insert(
        name.to_string(),
        Entry::Question(QuestionRecord::with_prior_answer(answer.clone())),
    );
}

fn merge_context<'a>(context: &'a mut Context, name: &str, path: &str) -> Option<&'a mut Context> {
    let asked_question = context.is_asked(name);
    if asked_question {
        warn!(path, "history context shadowed by an asked question; skipped");
        return None;
    }
    if context.record(name).is_some() {
        context.entries.remove(name);
    }
    let entry = context
        .entries
        .entry(name.to_string())
        .or_insert_with(|| Entry::Context(Context::new()));
    match entry {
        Entry::Context(child) => Some(child),
        Entry::Question(_) => None,
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn malformed(path: &str, reason: &str) -> WizardError {
    WizardError::MalformedHistory {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
