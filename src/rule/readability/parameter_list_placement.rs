use crate::diagnostic::Diagnostic;
use crate::rule::{Rule, RuleConfig};
use crate::syntax::source::SourceFile;
use crate::syntax::tree::SyntaxTree;

pub const MESSAGE: &str = "Parameter list must follow declaration.";

/// Flags parameter and argument lists whose first item is separated from the
/// opening parenthesis by one or more blank lines. Content on the same line
/// as the parenthesis, or on the very next line, is compliant. Empty lists
/// never trigger, no matter how far apart the delimiters sit — the rule is
/// about misplaced content, not delimiter spacing.
pub struct ParameterListMustFollowDeclaration;

impl Rule for ParameterListMustFollowDeclaration {
    fn name(&self) -> &'static str {
        "Readability/ParameterListMustFollowDeclaration"
    }

    fn check_tree(
        &self,
        source: &SourceFile,
        tree: &SyntaxTree,
        _config: &RuleConfig,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for node in tree.nodes() {
            let Some(first) = node.list.items.first() else {
                continue;
            };

            let (open_line, _) = source.offset_to_line_col(node.list.open.start);
            let (first_line, _) = source.offset_to_line_col(first.start);

            if first_line > open_line + 1 {
                // The offending line is reported at column 1 regardless of
                // the item's indentation.
                diagnostics.push(self.diagnostic(source, first_line, 1, MESSAGE.to_string()));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use crate::testutil::{
        ExpectedDiagnostic, ExpectedLocation, TEST_PATH, assert_diagnostics,
        assert_no_diagnostics, run_rule,
    };

    const RULE: ParameterListMustFollowDeclaration = ParameterListMustFollowDeclaration;

    fn violation(line: usize) -> ExpectedDiagnostic {
        ExpectedDiagnostic {
            rule_name: RULE.name().to_string(),
            message: MESSAGE.to_string(),
            severity: Severity::Warning,
            locations: vec![ExpectedLocation {
                path: TEST_PATH.to_string(),
                line,
                column: 1,
            }],
        }
    }

    #[test]
    fn empty_source() {
        assert_no_diagnostics(&RULE, "");
    }

    // ---- Method declarations ----

    #[test]
    fn method_declaration_parameters_two_lines_after_open_paren() {
        let source = "\nclass Foo\n{\n    public void Bar(\n\nstring s)\n    {\n\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(6)]);
    }

    #[test]
    fn method_declaration_parameters_on_next_line() {
        let source = "\nclass Foo\n{\n    public void Bar(\nstring s)\n    {\n\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn method_declaration_parameters_on_same_line() {
        let source = "\nclass Foo\n{\n    public void Bar(string s)\n    {\n\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn method_declaration_no_parameters() {
        let source = "\nclass Foo\n{\n    public void Bar(\n\n)\n    {\n\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    // ---- Invocation expressions ----

    #[test]
    fn method_call_arguments_two_lines_after_open_paren() {
        let source =
            "\nclass Foo\n{\n    public void Bar()\n    {\n        var e = 1.Equals(\n\n1);\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(8)]);
    }

    #[test]
    fn method_call_arguments_on_next_line() {
        let source =
            "\nclass Foo\n{\n    public void Bar()\n    {\n        var e = 1.Equals(\n1);\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn method_call_arguments_on_same_line() {
        let source = "\nclass Foo\n{\n    public void Bar()\n    {\n        var e = 1.Equals(1);\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn method_call_no_arguments() {
        // The blank line inside the empty list holds trailing spaces; an
        // empty list never triggers either way.
        let source =
            "\nclass Foo\n{\n    public void Bar()\n    {\n        var i = 1.ToString(\n                \n            );\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    // ---- Constructor declarations ----

    #[test]
    fn constructor_declaration_parameters_two_lines_after_open_paren() {
        let source = "\nclass Foo\n{\n    public Foo(\n\nstring s)\n    {\n\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(6)]);
    }

    #[test]
    fn constructor_declaration_parameters_on_next_line() {
        let source = "\nclass Foo\n{\n    public Foo(\nstring s)\n    {\n\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn constructor_declaration_parameters_on_same_line() {
        let source = "\nclass Foo\n{\n    public Foo(string s)\n    {\n\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn constructor_declaration_no_parameters() {
        let source = "\nclass Foo\n{\n    public Foo () \n    {\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    // ---- Object-creation expressions ----

    #[test]
    fn constructor_call_arguments_two_lines_after_open_paren() {
        let source = "\npublic class Foo\n{\n    public Foo(int i, int j)\n    {\n    }\n\n    public void Bar()\n    {\n        var f = new Foo(\n\n1,2);\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(12)]);
    }

    #[test]
    fn constructor_call_arguments_on_next_line() {
        let source = "\npublic class Foo\n{\n    public Foo(int i, int j)\n    {\n    }\n\n    public void Bar()\n    {\n        var f = new Foo(\n1,2);\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn constructor_call_arguments_on_same_line() {
        let source = "\npublic class Foo\n{\n    public Foo(int i, int j)\n    {\n    }\n\n    public void Bar()\n    {\n        var f = new Foo(1,2);\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    #[test]
    fn constructor_call_no_arguments() {
        let source =
            "\npublic class Foo\n{\n    public void Bar()\n    {\n       var f = new Foo(\n\n);\n    }\n}";
        assert_no_diagnostics(&RULE, source);
    }

    // ---- Cross-cutting behavior ----

    #[test]
    fn more_blank_lines_still_one_diagnostic() {
        let source = "\nclass Foo\n{\n    public void Bar(\n\n\n\nstring s)\n    {\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(8)]);
    }

    #[test]
    fn column_is_one_even_when_content_is_indented() {
        let source = "\nclass Foo\n{\n    public void Bar(\n\n            string s)\n    {\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(6)]);
    }

    #[test]
    fn nested_list_checked_independently_of_outer() {
        // The outer call violates; the nested call is compliant and must
        // not be dragged along.
        let source = "\nclass Foo\n{\n    public void Bar()\n    {\n        Outer(\n\nInner(1), 2);\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(8)]);
    }

    #[test]
    fn inner_violation_reported_when_outer_is_compliant() {
        let source = "\nclass Foo\n{\n    public void Bar()\n    {\n        Outer(Inner(\n\n1), 2);\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(8)]);
    }

    #[test]
    fn both_nesting_levels_can_violate() {
        let source = "\nclass Foo\n{\n    public void Bar()\n    {\n        Outer(\n\nInner(\n\n1), 2);\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(8), violation(10)]);
    }

    #[test]
    fn multiple_members_each_reported_in_source_order() {
        let source = "\nclass Foo\n{\n    public void A(\n\nint x)\n    {\n    }\n\n    public void B(\n\nint y)\n    {\n    }\n}";
        assert_diagnostics(&RULE, source, &[violation(6), violation(12)]);
    }

    #[test]
    fn evaluate_twice_yields_identical_diagnostics() {
        let source = "\nclass Foo\n{\n    public void Bar(\n\nstring s)\n    {\n    }\n}";
        let first = run_rule(&RULE, source);
        let second = run_rule(&RULE, source);
        assert_eq!(first, second);
    }

    #[test]
    fn no_fix_is_registered() {
        let text = "class Foo\n{\n    public void Bar(\n\nstring s)\n    {\n    }\n}";
        let source = SourceFile::from_string(std::path::PathBuf::from(TEST_PATH), text.to_string());
        let tree = SyntaxTree::parse(&source);
        assert!(RULE.fix(&source, &tree).is_none());
    }
}
