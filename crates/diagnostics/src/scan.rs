use crate::Diagnostic;

/// A single line of the buffer handed to a scanner
pub(crate) struct SourceLine<'a> {
    /// 1-based
    pub number: usize,
    pub text: &'a str,
    pub trimmed: &'a str,
}

impl SourceLine<'_> {
    /// Length of the untrimmed line in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// 1-based column of the first occurrence of `c`
    pub fn column_of(&self, c: char) -> Option<usize> {
        self.text
            .find(c)
            .map(|idx| self.text[..idx].chars().count() + 1)
    }
}

/// A per-language state machine fed one line at a time
pub(crate) trait LineScanner {
    /// Lexical comment check on the trimmed line. Block comment spans are not tracked.
    fn is_comment(&self, trimmed: &str) -> bool;

    /// Called for every line that is neither blank nor a comment
    fn scan_line(&mut self, line: &SourceLine<'_>, out: &mut Vec<Diagnostic>);

    /// Called once after the last line with the whole buffer
    fn finish(self, lines: &[&str], out: &mut Vec<Diagnostic>);
}

/// Whitespace trim that also drops a byte order mark
pub(crate) fn trim(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

pub(crate) fn run<S: LineScanner>(mut scanner: S, source: &str) -> Vec<Diagnostic> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut out = Vec::new();

    for (index, text) in lines.iter().enumerate() {
        let trimmed = trim(text);
        if trimmed.is_empty() || scanner.is_comment(trimmed) {
            continue;
        }
        let line = SourceLine {
            number: index + 1,
            text,
            trimmed,
        };
        scanner.scan_line(&line, &mut out);
    }

    scanner.finish(&lines, &mut out);
    out
}

/// Whether any line has non-whitespace content, comments included
pub(crate) fn has_content(lines: &[&str]) -> bool {
    lines.iter().any(|line| !trim(line).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_count_characters() {
        let line = SourceLine {
            number: 1,
            text: "é = {'a': 1}",
            trimmed: "é = {'a': 1}",
        };
        assert_eq!(line.len(), 12);
        assert_eq!(line.column_of(':'), Some(9));
        assert_eq!(line.column_of('#'), None);
    }

    #[test]
    fn content_includes_comments() {
        assert!(!has_content(&["", "   ", "\t"]));
        assert!(has_content(&["", "// only a comment"]));
        assert!(!has_content(&["\u{feff}", " "]));
    }

    #[test]
    fn trim_drops_byte_order_mark() {
        assert_eq!(trim("\u{feff}#include <stdio.h>  "), "#include <stdio.h>");
        assert_eq!(trim("\t x = 1\r"), "x = 1");
    }
}
