pub mod readability;
pub mod registry;

use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::syntax::source::SourceFile;
use crate::syntax::tree::SyntaxTree;

/// Per-rule configuration extracted from .sharpcop.yml.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// A check rule. Implementations must be Send + Sync so they can be shared
/// across rayon worker threads.
pub trait Rule: Send + Sync {
    /// The fully-qualified rule name, e.g. "Readability/ParameterListMustFollowDeclaration".
    fn name(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Tree-based check — runs once per source file over the list tree.
    fn check_tree(
        &self,
        source: &SourceFile,
        tree: &SyntaxTree,
        config: &RuleConfig,
    ) -> Vec<Diagnostic>;

    /// Whole-text rewrite correcting this rule's findings. Rules without a
    /// registered fix return `None`; callers must treat that as a normal
    /// state, not a failure.
    fn fix(&self, _source: &SourceFile, _tree: &SyntaxTree) -> Option<String> {
        None
    }

    /// Build a single-location diagnostic for this rule at the given
    /// 1-indexed position.
    fn diagnostic(
        &self,
        source: &SourceFile,
        line: usize,
        column: usize,
        message: String,
    ) -> Diagnostic {
        Diagnostic::new(
            self.name(),
            self.default_severity(),
            message,
            Location {
                path: source.path_str().to_string(),
                line,
                column,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FakeRule;

    impl Rule for FakeRule {
        fn name(&self) -> &'static str {
            "Readability/Fake"
        }

        fn check_tree(
            &self,
            _source: &SourceFile,
            _tree: &SyntaxTree,
            _config: &RuleConfig,
        ) -> Vec<Diagnostic> {
            Vec::new()
        }
    }

    #[test]
    fn default_config_is_enabled_without_override() {
        let config = RuleConfig::default();
        assert!(config.enabled);
        assert_eq!(config.severity, None);
    }

    #[test]
    fn diagnostic_helper_fills_rule_fields() {
        let source = SourceFile::from_string(PathBuf::from("Test0.cs"), "class C { }".to_string());
        let d = FakeRule.diagnostic(&source, 4, 1, "msg".to_string());
        assert_eq!(d.rule_name, "Readability/Fake");
        assert_eq!(d.severity, Severity::Warning);
        assert_eq!(d.primary().path, "Test0.cs");
        assert_eq!(d.primary().line, 4);
        assert_eq!(d.primary().column, 1);
    }

    #[test]
    fn rules_have_no_fix_by_default() {
        let source = SourceFile::from_string(PathBuf::from("Test0.cs"), String::new());
        let tree = SyntaxTree::parse(&source);
        assert!(FakeRule.fix(&source, &tree).is_none());
    }
}
