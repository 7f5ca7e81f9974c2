//! Turns an educator's pasted quiz text into [`Question`] records.
//!
//! The accepted layout is one question per block, blocks separated by a line
//! of three or more `=` characters:
//!
//! ```text
//! 1. 2+2?
//! a. 3
//! b. 4 - correct
//! c. 5
//! =====
//! ```
//!
//! Parsing never fails. Blocks that cannot produce a question are skipped and
//! only counted, so the caller can tell "nothing usable" apart from an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::domain::{Question, QuestionOption};

static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"={3,}").expect("BLOCK_SEPARATOR is a valid regex pattern"));

static QUESTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[.)]\s*\S").expect("QUESTION_LINE is a valid regex pattern")
});

static QUESTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]").expect("QUESTION_PREFIX is a valid regex pattern"));

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-dA-D])[.)]\s*(.+)$").expect("OPTION_LINE is a valid regex pattern")
});

// `\b` keeps option text such as "Incorrect" from reading as a marker.
static CORRECT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*-?\s*\bcorrect$").expect("CORRECT_MARKER is a valid regex pattern")
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// More than one option was marked; the last marked label was kept.
    MultipleCorrectMarkers { number: u32, labels: Vec<String> },
    MissingCorrectAnswer { number: u32 },
    SkippedBlocks { count: usize },
}

impl ParseWarning {
    pub fn message(&self) -> String {
        match self {
            ParseWarning::MultipleCorrectMarkers { number, labels } => format!(
                "Question {} has several options marked correct ({}); using '{}'",
                number,
                labels.join(", "),
                labels.last().map(String::as_str).unwrap_or_default()
            ),
            ParseWarning::MissingCorrectAnswer { number } => {
                format!("Question {} has no option marked correct", number)
            }
            ParseWarning::SkippedBlocks { count } => {
                format!("{} block(s) could not be read as a question", count)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    pub warnings: Vec<ParseWarning>,
}

/// Parses `raw` into questions, numbered 1.. in the order they appear.
pub fn parse_quiz_text(raw: &str) -> Vec<Question> {
    parse_quiz_report(raw).questions
}

/// Same as [`parse_quiz_text`], plus non-fatal warnings for the author.
pub fn parse_quiz_report(raw: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut skipped = 0;

    for block in BLOCK_SEPARATOR
        .split(raw)
        .map(str::trim)
        .filter(|b| !b.is_empty())
    {
        let number = report.questions.len() as u32 + 1;
        match parse_block(block, number) {
            Some(parsed) => {
                if parsed.marked.len() > 1 {
                    report.warnings.push(ParseWarning::MultipleCorrectMarkers {
                        number,
                        labels: parsed.marked,
                    });
                } else if parsed.question.correct_answer.is_none() {
                    report
                        .warnings
                        .push(ParseWarning::MissingCorrectAnswer { number });
                }
                report.questions.push(parsed.question);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        report
            .warnings
            .push(ParseWarning::SkippedBlocks { count: skipped });
    }

    log::debug!(
        "Parsed {} question(s), skipped {} block(s)",
        report.questions.len(),
        skipped
    );

    report
}

struct ParsedBlock {
    question: Question,
    marked: Vec<String>,
}

fn parse_block(block: &str, number: u32) -> Option<ParsedBlock> {
    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < 2 {
        return None;
    }

    let question_idx = lines.iter().position(|l| QUESTION_LINE.is_match(l))?;
    let question_text = QUESTION_PREFIX
        .replace(lines[question_idx], "")
        .trim()
        .to_string();
    if question_text.is_empty() {
        return None;
    }

    let mut options = Vec::new();
    let mut marked = Vec::new();

    for line in &lines[question_idx + 1..] {
        let Some(caps) = OPTION_LINE.captures(line) else {
            continue;
        };
        let label = caps[1].to_ascii_lowercase();
        let mut text = caps[2].trim().to_string();

        if CORRECT_MARKER.is_match(&text) {
            text = CORRECT_MARKER.replace(&text, "").trim().to_string();
            marked.push(label.clone());
        }

        options.push(QuestionOption { label, text });
    }

    if options.is_empty() {
        return None;
    }

    Some(ParsedBlock {
        question: Question {
            number,
            question: question_text,
            options,
            correct_answer: marked.last().cloned(),
        },
        marked,
    })
}
