//! Parser for the line-oriented survey results format.
//!
//! ```text
//! 问题1:【评分题】您对新手引导教程的满意度如何？
//! 1: 52 (8.64%)
//! 2: 11 (1.83%)
//!
//! 问题2:【填空题】其他建议
//! 37
//! ```
//!
//! Parsing is best effort: every line-level step returns an `Option`, and a
//! `None` means that the line is skipped. A document where nothing is
//! recognized produces an empty survey.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::builder::Builder;
use crate::config::*;

/// The words that can start a question header.
pub const HEADER_MARKERS: &[&str] = &["问题", "Question"];

const OPEN_BRACKET: char = '【';
const CLOSE_BRACKET: char = '】';

// The count is the first number that follows a colon and a space. Anything after
// it (usually a percentage in parentheses) is ignored.
static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r": (\d+)").unwrap());

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct Header<'a> {
    question_type: QuestionType,
    text: &'a str,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Line<'a> {
    Blank,
    /// A line shaped like a header. None if the header could not be understood.
    Header(Option<Header<'a>>),
    Data(&'a str),
}

fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        Line::Blank
    } else if is_header_shaped(line) {
        Line::Header(parse_header(line))
    } else {
        Line::Data(line)
    }
}

// Both brackets must be present, in any order. A misordered header still ends
// the current block, and parse_header then rejects it.
fn is_header_shaped(line: &str) -> bool {
    HEADER_MARKERS.iter().any(|m| line.starts_with(m))
        && line.contains(OPEN_BRACKET)
        && line.contains(CLOSE_BRACKET)
}

fn parse_header(line: &str) -> Option<Header<'_>> {
    let start = line.find(OPEN_BRACKET)? + OPEN_BRACKET.len_utf8();
    let end = start + line[start..].find(CLOSE_BRACKET)?;
    let question_type = QuestionType::from_label(&line[start..end])?;
    let text = line[end + CLOSE_BRACKET.len_utf8()..]
        .trim()
        .trim_end_matches('\t');
    if text.is_empty() {
        return None;
    }
    Some(Header {
        question_type,
        text,
    })
}

/// Parses `<label>: <count> [annotation]`.
fn parse_option_line(line: &str) -> Option<(String, u64)> {
    let (label, _) = line.split_once(':')?;
    let caps = COUNT_RE.captures(line)?;
    let count = caps.get(1)?.as_str().parse::<u64>().ok()?;
    Some((label.trim().to_string(), count))
}

fn parse_total(line: &str) -> Option<u64> {
    line.trim().parse::<u64>().ok()
}

/// Reads the data lines of one block, starting at `start`.
///
/// Returns the question and the index of the first line that was not consumed.
fn read_block(header: Header, lines: &[&str], start: usize) -> (Question, usize) {
    let mut question = Question::new(header.text, header.question_type);
    let mut idx = start;
    while idx < lines.len() {
        let line = match classify_line(lines[idx]) {
            Line::Blank => {
                idx += 1;
                continue;
            }
            Line::Header(_) => break,
            Line::Data(line) => line,
        };
        idx += 1;
        match question.question_type {
            QuestionType::FillInBlank => {
                let total = parse_total(line).unwrap_or_else(|| {
                    debug!("parse: line {}: unreadable total {:?}, using 0", idx, line);
                    0
                });
                question.counts = vec![total];
                break;
            }
            QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Rating => {
                if let Some((label, count)) = parse_option_line(line) {
                    question.options.push(label);
                    question.counts.push(count);
                } else {
                    debug!("parse: line {}: skipping {:?}", idx, line);
                }
            }
        }
    }
    (question, idx)
}

/// Parses a whole document into a survey.
///
/// When several questions share the same text, the last one wins.
pub fn parse_survey(content: &str) -> Survey {
    let lines: Vec<&str> = content.lines().collect();
    let mut builder = Builder::new();
    let mut idx = 0;
    while idx < lines.len() {
        match classify_line(lines[idx]) {
            Line::Header(Some(header)) => {
                let (question, next_idx) = read_block(header, &lines, idx + 1);
                debug!(
                    "parse: line {}: {:?} question with {} options: {:?}",
                    idx + 1,
                    question.question_type,
                    question.options.len(),
                    question.text
                );
                if let Err(e) = builder.add_question(question) {
                    debug!("parse: line {}: dropping question: {}", idx + 1, e);
                }
                idx = next_idx;
            }
            Line::Header(None) => {
                debug!("parse: line {}: unrecognized header {:?}", idx + 1, lines[idx]);
                idx += 1;
            }
            Line::Blank | Line::Data(_) => {
                idx += 1;
            }
        }
    }
    let survey = builder.build();
    info!(
        "parse: {} questions out of {} lines",
        survey.len(),
        lines.len()
    );
    survey
}
