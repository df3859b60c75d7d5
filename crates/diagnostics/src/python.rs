//! Python: misplaced colons and per-line bracket balance

use crate::{
    Diagnostic,
    scan::{LineScanner, SourceLine},
};

/// Statements that legitimately end in a colon
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "elif", "else", "for", "while", "def", "class", "try", "except", "finally", "with",
];

#[derive(Debug, Default)]
pub(crate) struct PythonScanner;

fn opens_block(trimmed: &str) -> bool {
    BLOCK_KEYWORDS.iter().any(|keyword| {
        trimmed
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.starts_with(' ') || rest == ":")
    })
}

fn opening(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

impl LineScanner for PythonScanner {
    fn is_comment(&self, trimmed: &str) -> bool {
        trimmed.starts_with('#')
    }

    fn scan_line(&mut self, line: &SourceLine<'_>, out: &mut Vec<Diagnostic>) {
        let trimmed = line.trimmed;
        if trimmed.ends_with(':') && !opens_block(trimmed) && !trimmed.contains("lambda") {
            let column = line.column_of(':').unwrap_or(1);
            out.push(Diagnostic::error(line.number, column, "Unexpected colon"));
        }

        // brackets are balanced within the line only
        let mut stack = Vec::new();
        for (index, c) in line.text.chars().enumerate() {
            match c {
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    if stack.pop() != Some(opening(c)) {
                        out.push(Diagnostic::error(
                            line.number,
                            index + 1,
                            format!("Unmatched '{c}'"),
                        ));
                    }
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            out.push(Diagnostic::error(
                line.number,
                line.len(),
                format!("Unclosed '{open}'"),
            ));
        }
    }

    fn finish(self, _lines: &[&str], _out: &mut Vec<Diagnostic>) {}
}
