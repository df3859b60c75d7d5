use diagnostics::{Diagnostic, Severity, validate, validate_named};
use store::{Language, Store};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let _ = color_eyre::install();
}

const PYTHON_PROGRAM: &str = r#"# fibonacci
def fib(n):
    if n < 2:
        return n
    return fib(n - 1) + fib(n - 2)

for i in range(10):
    print(fib(i))
"#;

const C_PROGRAM: &str = r#"#include <stdio.h>

/* entry point */
int main() {
    int total = 0;
    for (int i = 0; i < 10; i++) {
        total += i;
    }
    printf("%d\n", total);
    return 0;
}
"#;

const JAVA_PROGRAM: &str = r#"package demo;

import java.util.List;

public class Main {
    public static void main(String[] args) {
        int x = 1;
        try {
            System.out.println(x);
        } catch (Exception e) {
            System.out.println("oops");
        }
    }
}
"#;

#[test]
fn python_block_statement_is_not_a_colon_error() {
    let diagnostics = validate("if True\n    print(1)", Language::Python);
    assert!(
        diagnostics
            .iter()
            .all(|d| d.message != "Unexpected colon"),
        "{diagnostics:?}"
    );
}

#[test]
fn python_stray_colon() {
    let diagnostics = validate("foo:\n", Language::Python);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Unexpected colon");
    assert_eq!(diagnostics[0].line, 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}

#[test]
fn python_mismatched_bracket() {
    let diagnostics = validate("(1, 2]", Language::Python);
    assert_eq!(diagnostics, vec![Diagnostic::error(1, 6, "Unmatched ']'")]);
}

#[test]
fn c_minimal_program_is_clean() {
    assert!(validate("int main() {\n  return 0;\n}", Language::C).is_empty());
}

#[test]
fn c_unclosed_brace() {
    let diagnostics = validate("int main() {\n  return 0;", Language::C);
    assert_eq!(diagnostics, vec![Diagnostic::error(2, 1, "Unclosed brace")]);
}

#[test]
fn cpp_uses_c_rules() {
    assert_eq!(
        validate("int main() {\n  return 0;", Language::Cpp),
        validate("int main() {\n  return 0;", Language::C)
    );
}

#[test]
fn c_without_main() {
    let diagnostics = validate("int add(int a, int b) {\n  return a + b;\n}", Language::C);
    assert_eq!(
        diagnostics,
        vec![Diagnostic::warning(1, 1, "No main function found")]
    );
}

#[test]
fn java_missing_class() {
    let diagnostics = validate("int x = 1;", Language::Java);
    assert_eq!(
        diagnostics,
        vec![Diagnostic::warning(1, 1, "No class declaration found")]
    );
}

#[test]
fn realistic_programs_are_clean() {
    assert_eq!(validate(PYTHON_PROGRAM, Language::Python), Vec::<Diagnostic>::new());
    assert_eq!(validate(C_PROGRAM, Language::C), Vec::<Diagnostic>::new());
    assert_eq!(validate(C_PROGRAM, Language::Cpp), Vec::<Diagnostic>::new());
    assert_eq!(validate(JAVA_PROGRAM, Language::Java), Vec::<Diagnostic>::new());
}

#[test]
fn empty_input_has_no_diagnostics() {
    for language in Language::ALL {
        assert!(validate("", language).is_empty(), "{language}");
        assert!(validate("  \n\t\n", language).is_empty(), "{language}");
    }
}

#[test]
fn byte_order_mark_is_ignored() {
    let c = "\u{feff}#include <stdio.h>\nint main() {\n  return 0;\n}";
    assert_eq!(validate(c, Language::C), Vec::<Diagnostic>::new());

    assert!(validate("\u{feff}# note:", Language::Python).is_empty());
    assert_eq!(
        validate("\u{feff}foo:", Language::Python),
        vec![Diagnostic::error(1, 5, "Unexpected colon")]
    );
    assert!(validate("\u{feff}", Language::Java).is_empty());
}

#[test]
fn validation_is_deterministic() {
    let sources = [
        "foo:\n(1, 2]\nx = [",
        "int x = 1\nint y\n}",
        "class A {\n  int x\n",
        PYTHON_PROGRAM,
    ];
    for source in sources {
        for language in Language::ALL {
            assert_eq!(validate(source, language), validate(source, language));
        }
    }
}

#[test]
fn diagnostics_are_ordered_top_to_bottom() {
    let diagnostics = validate("a = (]\nb:\nc = {", Language::Python);
    let positions: Vec<_> = diagnostics.iter().map(|d| (d.line, d.column)).collect();
    assert_eq!(positions, vec![(1, 6), (2, 2), (3, 5)]);
    assert_eq!(
        diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>(),
        vec!["Unmatched ']'", "Unexpected colon", "Unclosed '{'"]
    );
}

#[test]
fn unknown_language_name_is_ignored() {
    assert!(validate_named("foo:", "ruby").is_empty());
    assert_eq!(validate_named("foo:", "python").len(), 1);
}

#[test]
fn validates_store_contents() {
    let mut store = Store::new();
    store.load_code_from_storage("int main() {\n  int x = 1\n}", Language::C);

    let editor = store.editor();
    let diagnostics = validate(editor.code(), editor.language());
    assert_eq!(
        diagnostics,
        vec![Diagnostic::warning(2, 11, "Missing semicolon")]
    );
}
