//! C, C++ and Java: brace balance, missing semicolons and required top level constructs

use crate::{
    Diagnostic,
    scan::{LineScanner, SourceLine, has_content},
};

const C_CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default",
];

const JAVA_CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "default", "try", "catch", "finally",
];

/// Prefixes of lines that never need a terminator
const C_EXEMPT_PREFIXES: &[&str] = &["#"];
const JAVA_EXEMPT_PREFIXES: &[&str] = &["package", "import"];

fn is_c_comment(trimmed: &str) -> bool {
    trimmed.starts_with("//") || trimmed.starts_with("/*")
}

/// Running count of `{` minus `}` over the whole buffer
#[derive(Debug, Default, Clone, Copy)]
struct BraceBalance(i64);

impl BraceBalance {
    fn count(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '{' => self.0 += 1,
                '}' => self.0 -= 1,
                _ => {}
            }
        }
    }
}

fn is_control(trimmed: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        trimmed
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.starts_with([' ', '(']))
    })
}

/// Lines containing `(` are taken to be function headers or calls and are never flagged.
fn missing_semicolon(trimmed: &str, keywords: &[&str], exempt_prefixes: &[&str]) -> bool {
    !trimmed.ends_with([';', '{', '}'])
        && !exempt_prefixes
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
        && !trimmed.contains("//")
        && !is_control(trimmed, keywords)
        && !trimmed.contains('(')
        && trimmed.chars().count() > 1
}

#[derive(Debug, Default)]
pub(crate) struct CScanner {
    braces: BraceBalance,
    has_main: bool,
}

impl LineScanner for CScanner {
    fn is_comment(&self, trimmed: &str) -> bool {
        is_c_comment(trimmed)
    }

    fn scan_line(&mut self, line: &SourceLine<'_>, out: &mut Vec<Diagnostic>) {
        if line.trimmed.contains("main(") {
            self.has_main = true;
        }

        self.braces.count(line.text);

        if missing_semicolon(line.trimmed, C_CONTROL_KEYWORDS, C_EXEMPT_PREFIXES) {
            out.push(Diagnostic::warning(
                line.number,
                line.len(),
                "Missing semicolon",
            ));
        }
    }

    fn finish(self, lines: &[&str], out: &mut Vec<Diagnostic>) {
        let BraceBalance(balance) = self.braces;
        if balance != 0 {
            let message = if balance > 0 {
                "Unclosed brace"
            } else {
                "Extra closing brace"
            };
            out.push(Diagnostic::error(lines.len(), 1, message));
        }

        if !self.has_main && has_content(lines) {
            out.push(Diagnostic::warning(1, 1, "No main function found"));
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct JavaScanner {
    braces: BraceBalance,
    has_class: bool,
    has_main: bool,
}

impl LineScanner for JavaScanner {
    fn is_comment(&self, trimmed: &str) -> bool {
        is_c_comment(trimmed)
    }

    fn scan_line(&mut self, line: &SourceLine<'_>, out: &mut Vec<Diagnostic>) {
        if line.trimmed.contains("class ") {
            self.has_class = true;
        }
        if line.trimmed.contains("public static void main") {
            self.has_main = true;
        }

        self.braces.count(line.text);

        if missing_semicolon(line.trimmed, JAVA_CONTROL_KEYWORDS, JAVA_EXEMPT_PREFIXES) {
            out.push(Diagnostic::warning(
                line.number,
                line.len(),
                "Missing semicolon",
            ));
        }
    }

    fn finish(self, lines: &[&str], out: &mut Vec<Diagnostic>) {
        // brace balance and the main method are tracked but not reported for java
        let BraceBalance(balance) = self.braces;
        tracing::trace!(
            brace_balance = balance,
            has_main = self.has_main,
            "java scan finished"
        );

        if !self.has_class && has_content(lines) {
            out.push(Diagnostic::warning(1, 1, "No class declaration found"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::run;

    #[test]
    fn control_keywords_need_space_or_paren() {
        assert!(is_control("if (x)", C_CONTROL_KEYWORDS));
        assert!(!is_control("else", C_CONTROL_KEYWORDS));
        assert!(is_control("else if", C_CONTROL_KEYWORDS));
        assert!(is_control("while(1)", C_CONTROL_KEYWORDS));
        assert!(!is_control("double x", C_CONTROL_KEYWORDS));
        assert!(!is_control("try {", C_CONTROL_KEYWORDS));
        assert!(is_control("try {", JAVA_CONTROL_KEYWORDS));
    }

    #[test]
    fn missing_semicolon_rules() {
        let c = |line: &str| missing_semicolon(line, C_CONTROL_KEYWORDS, C_EXEMPT_PREFIXES);
        let java =
            |line: &str| missing_semicolon(line, JAVA_CONTROL_KEYWORDS, JAVA_EXEMPT_PREFIXES);

        assert!(c("int x = 1"));
        assert!(!c("int x = 1;"));
        assert!(!c("#include <stdio.h>"));
        assert!(!c("int x = 1 // note"));
        assert!(!c("printf(\"hi\")"));
        assert!(!c("x"));
        assert!(!c("case 1:"));
        assert!(c("import java.util.List"));
        assert!(!java("import java.util.List"));
        assert!(java("#define N 10"));
    }

    #[test]
    fn c_missing_semicolon_column_is_line_length() {
        let diagnostics = run(CScanner::default(), "int main() {\n    int x = 1\n}");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::warning(2, 13, "Missing semicolon")]
        );
    }

    #[test]
    fn c_extra_closing_brace_on_last_line() {
        let diagnostics = run(CScanner::default(), "int main() {\n}\n}\n");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::error(4, 1, "Extra closing brace")]
        );
    }

    #[test]
    fn c_block_comment_interior_is_scanned() {
        let diagnostics = run(
            CScanner::default(),
            "/* start\n   still comment\n*/\nint main() { return 0; }",
        );
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::warning(2, 16, "Missing semicolon"),
                Diagnostic::warning(3, 2, "Missing semicolon"),
            ]
        );
    }

    #[test]
    fn c_comment_only_buffer_still_needs_main() {
        let diagnostics = run(CScanner::default(), "// nothing here");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::warning(1, 1, "No main function found")]
        );
    }

    #[test]
    fn c_preprocessor_braces_still_count() {
        let diagnostics = run(
            CScanner::default(),
            "#define OPEN {\nint main() {\n  return 0;\n}",
        );
        assert_eq!(diagnostics, vec![Diagnostic::error(4, 1, "Unclosed brace")]);
    }

    #[test]
    fn java_comment_only_buffer_still_needs_class() {
        let diagnostics = run(JavaScanner::default(), "// nothing here\n/* or here */");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::warning(1, 1, "No class declaration found")]
        );
    }

    #[test]
    fn java_brace_imbalance_is_silent() {
        let diagnostics = run(JavaScanner::default(), "public class Main {\n  int x = 1;");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn java_missing_main_is_silent() {
        let diagnostics = run(JavaScanner::default(), "class A {\n}");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn java_package_and_import_are_exempt() {
        let source = "package demo\nimport java.util.List\npublic class Main {\n  int count\n}";
        let diagnostics = run(JavaScanner::default(), source);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::warning(4, 11, "Missing semicolon")]
        );
    }
}
