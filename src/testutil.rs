//! Diagnostic verification harness.
//!
//! Runs a rule against fixture source text and compares the produced
//! diagnostics with an expected set, field by field. Public (not
//! test-gated) so both unit tests and integration tests can drive it, and
//! so downstream rule authors get the same harness the built-in rules use.

use std::fmt;
use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, Severity};
use crate::rule::{Rule, RuleConfig};
use crate::syntax::source::SourceFile;
use crate::syntax::tree::SyntaxTree;

/// Virtual file name given to fixture sources that have no real path.
pub const TEST_PATH: &str = "Test0.cs";

/// A location an expected diagnostic should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedLocation {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

/// An expected diagnostic, authored as literal test data. Compared once,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDiagnostic {
    pub rule_name: String,
    pub message: String,
    pub severity: Severity,
    pub locations: Vec<ExpectedLocation>,
}

/// Why a verification failed: the first differing index and field, with
/// both rendered values. Never a bare boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Count {
        expected: usize,
        actual: usize,
        expected_rendering: String,
        actual_rendering: String,
    },
    Field {
        index: usize,
        field: &'static str,
        expected: String,
        actual: String,
    },
    /// The rule registers no fix but a fixed text was expected.
    MissingFix,
    FixedText {
        expected: String,
        actual: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Count {
                expected,
                actual,
                expected_rendering,
                actual_rendering,
            } => write!(
                f,
                "Expected {expected} diagnostic(s) but got {actual}.\nExpected:\n{expected_rendering}\nActual:\n{actual_rendering}",
            ),
            Mismatch::Field {
                index,
                field,
                expected,
                actual,
            } => write!(
                f,
                "Diagnostic #{}: {field} mismatch\n  expected: {expected}\n  actual:   {actual}",
                index + 1,
            ),
            Mismatch::MissingFix => {
                write!(f, "A fixed text was expected but the rule registers no fix.")
            }
            Mismatch::FixedText { expected, actual } => write!(
                f,
                "Fixed text mismatch\n  expected: {expected:?}\n  actual:   {actual:?}",
            ),
        }
    }
}

/// Run a rule on fixture source text and return its diagnostics.
///
/// Use this for custom assertions where the standard `assert_diagnostics`
/// helpers don't fit (e.g. checking idempotence or partial matching).
pub fn run_rule(rule: &dyn Rule, source_text: &str) -> Vec<Diagnostic> {
    run_rule_with_config(rule, source_text, &RuleConfig::default())
}

/// Run a rule on fixture source text with a specific config.
pub fn run_rule_with_config(
    rule: &dyn Rule,
    source_text: &str,
    config: &RuleConfig,
) -> Vec<Diagnostic> {
    let source = SourceFile::from_string(PathBuf::from(TEST_PATH), source_text.to_string());
    let tree = SyntaxTree::parse(&source);
    rule.check_tree(&source, &tree, config)
}

/// Run a rule and compare its diagnostics against `expected`.
///
/// An empty `expected` asserts that no diagnostics are produced — the
/// common case for compliant fixtures, and a real assertion rather than
/// the absence of one.
pub fn verify_diagnostics(
    rule: &dyn Rule,
    source_text: &str,
    expected: &[ExpectedDiagnostic],
) -> Result<(), Mismatch> {
    compare(&run_rule(rule, source_text), expected)
}

/// Ordered, field-wise comparison of actual diagnostics against expected
/// ones. Sequences must have equal length; for each index the rule name,
/// exact message text, severity, and every location triple must match.
pub fn compare(actual: &[Diagnostic], expected: &[ExpectedDiagnostic]) -> Result<(), Mismatch> {
    if actual.len() != expected.len() {
        return Err(Mismatch::Count {
            expected: expected.len(),
            actual: actual.len(),
            expected_rendering: format_expected(expected),
            actual_rendering: format_diagnostics(actual),
        });
    }

    for (index, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        let field = |field, expected: String, actual: String| Mismatch::Field {
            index,
            field,
            expected,
            actual,
        };

        if act.rule_name != exp.rule_name {
            return Err(field("rule name", exp.rule_name.clone(), act.rule_name.clone()));
        }
        if act.message != exp.message {
            return Err(field(
                "message",
                format!("{:?}", exp.message),
                format!("{:?}", act.message),
            ));
        }
        if act.severity != exp.severity {
            return Err(field(
                "severity",
                format!("{:?}", exp.severity),
                format!("{:?}", act.severity),
            ));
        }
        if act.locations.len() != exp.locations.len() {
            return Err(field(
                "location count",
                exp.locations.len().to_string(),
                act.locations.len().to_string(),
            ));
        }
        for (al, el) in act.locations.iter().zip(exp.locations.iter()) {
            if al.path != el.path {
                return Err(field("location path", el.path.clone(), al.path.clone()));
            }
            if al.line != el.line {
                return Err(field("location line", el.line.to_string(), al.line.to_string()));
            }
            if al.column != el.column {
                return Err(field(
                    "location column",
                    el.column.to_string(),
                    al.column.to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Run a rule on fixture source text and assert the diagnostics match.
pub fn assert_diagnostics(rule: &dyn Rule, source_text: &str, expected: &[ExpectedDiagnostic]) {
    if let Err(mismatch) = verify_diagnostics(rule, source_text, expected) {
        panic!("{mismatch}");
    }
}

/// Assert a rule produces no diagnostics on the given source text.
pub fn assert_no_diagnostics(rule: &dyn Rule, source_text: &str) {
    let diagnostics = run_rule(rule, source_text);
    assert!(
        diagnostics.is_empty(),
        "Expected no diagnostics but got {}:\n{}",
        diagnostics.len(),
        format_diagnostics(&diagnostics),
    );
}

/// Apply a rule's registered fix to the fixture source. `None` means the
/// rule registers no fix — a legal state, not an error.
pub fn apply_fix(rule: &dyn Rule, source_text: &str) -> Option<String> {
    let source = SourceFile::from_string(PathBuf::from(TEST_PATH), source_text.to_string());
    let tree = SyntaxTree::parse(&source);
    rule.fix(&source, &tree)
}

/// Apply a rule's fix and compare the result with the expected text.
pub fn verify_fix(rule: &dyn Rule, source_text: &str, expected_fixed: &str) -> Result<(), Mismatch> {
    match apply_fix(rule, source_text) {
        None => Err(Mismatch::MissingFix),
        Some(fixed) if fixed == expected_fixed => Ok(()),
        Some(fixed) => Err(Mismatch::FixedText {
            expected: expected_fixed.to_string(),
            actual: fixed,
        }),
    }
}

fn format_expected(expected: &[ExpectedDiagnostic]) -> String {
    if expected.is_empty() {
        return "  (none)".to_string();
    }
    expected
        .iter()
        .map(|e| {
            let locs = e
                .locations
                .iter()
                .map(|l| format!("{}:{}:{}", l.path, l.line, l.column))
                .collect::<Vec<_>>()
                .join(", ");
            format!("  {locs} {}: {}", e.rule_name, e.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "  (none)".to_string();
    }
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}
