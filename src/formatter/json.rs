use std::io::Write;

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::formatter::Formatter;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    offenses: Vec<Offense>,
}

#[derive(Serialize)]
struct Metadata {
    files_inspected: usize,
    offense_count: usize,
}

#[derive(Serialize)]
struct Offense {
    rule_name: String,
    severity: String,
    message: String,
    locations: Vec<OffenseLocation>,
}

#[derive(Serialize)]
struct OffenseLocation {
    path: String,
    line: usize,
    column: usize,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, diagnostics: &[Diagnostic], file_count: usize, out: &mut dyn Write) {
        let output = JsonOutput {
            metadata: Metadata {
                files_inspected: file_count,
                offense_count: diagnostics.len(),
            },
            offenses: diagnostics
                .iter()
                .map(|d| Offense {
                    rule_name: d.rule_name.clone(),
                    severity: d.severity.letter().to_string(),
                    message: d.message.clone(),
                    locations: d
                        .locations
                        .iter()
                        .map(|l| OffenseLocation {
                            path: l.path.clone(),
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                })
                .collect(),
        };

        match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
            }
            Err(e) => {
                let _ = writeln!(out, "{{\"error\": \"failed to serialize output: {e}\"}}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{Location, Severity};

    fn render(diagnostics: &[Diagnostic], file_count: usize) -> serde_json::Value {
        let mut buf = Vec::new();
        JsonFormatter.format_to(diagnostics, file_count, &mut buf);
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn empty_run_has_zero_counts() {
        let v = render(&[], 3);
        assert_eq!(v["metadata"]["files_inspected"], 3);
        assert_eq!(v["metadata"]["offense_count"], 0);
        assert_eq!(v["offenses"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn offense_fields_serialized() {
        let d = Diagnostic::new(
            "Readability/ParameterListMustFollowDeclaration",
            Severity::Warning,
            "Parameter list must follow declaration.",
            Location {
                path: "Foo.cs".to_string(),
                line: 6,
                column: 1,
            },
        );
        let v = render(&[d], 1);
        let offense = &v["offenses"][0];
        assert_eq!(
            offense["rule_name"],
            "Readability/ParameterListMustFollowDeclaration"
        );
        assert_eq!(offense["severity"], "W");
        assert_eq!(offense["message"], "Parameter list must follow declaration.");
        assert_eq!(offense["locations"][0]["path"], "Foo.cs");
        assert_eq!(offense["locations"][0]["line"], 6);
        assert_eq!(offense["locations"][0]["column"], 1);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn severity_strategy() -> impl Strategy<Value = Severity> {
            prop::sample::select(vec![
                Severity::Hidden,
                Severity::Info,
                Severity::Warning,
                Severity::Error,
            ])
        }

        fn diagnostic_strategy() -> impl Strategy<Value = Diagnostic> {
            (
                "[A-Za-z]{1,10}\\.cs",
                1usize..500,
                1usize..200,
                severity_strategy(),
                "[A-Z][a-z]+/[A-Z][a-z]+",
                "[a-z .]{1,40}",
            )
                .prop_map(|(path, line, column, severity, rule_name, message)| {
                    Diagnostic::new(
                        rule_name,
                        severity,
                        message,
                        crate::diagnostic::Location { path, line, column },
                    )
                })
        }

        proptest! {
            #[test]
            fn output_is_valid_json_with_matching_counts(
                diagnostics in prop::collection::vec(diagnostic_strategy(), 0..10),
                file_count in 0usize..100,
            ) {
                let v = render(&diagnostics, file_count);
                prop_assert_eq!(
                    v["metadata"]["offense_count"].as_u64().unwrap() as usize,
                    diagnostics.len()
                );
                prop_assert_eq!(
                    v["offenses"].as_array().unwrap().len(),
                    diagnostics.len()
                );
            }
        }
    }
}
