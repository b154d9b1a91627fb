use std::path::PathBuf;

use rayon::prelude::*;

use crate::cli::Args;
use crate::config::ResolvedConfig;
use crate::diagnostic::Diagnostic;
use crate::rule::registry::RuleRegistry;
use crate::syntax::source::SourceFile;
use crate::syntax::tree::SyntaxTree;

pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub file_count: usize,
}

/// Run all enabled rules on one source file (already loaded into memory).
/// Also used directly for --stdin mode.
pub fn lint_source(
    source: &SourceFile,
    config: &ResolvedConfig,
    registry: &RuleRegistry,
    args: &Args,
) -> Vec<Diagnostic> {
    let tree = SyntaxTree::parse(source);
    let has_only = !args.only.is_empty();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        let name = rule.name();
        if has_only && !args.only.iter().any(|o| o == name) {
            continue;
        }
        if args.except.iter().any(|e| e == name) {
            continue;
        }
        if !config.is_rule_enabled(name) {
            continue;
        }

        let rule_config = config.rule_config(name);
        let mut rule_diags = rule.check_tree(source, &tree, &rule_config);
        if let Some(severity) = rule_config.severity {
            for d in &mut rule_diags {
                d.severity = severity;
            }
        }
        diagnostics.extend(rule_diags);
    }

    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    diagnostics
}

pub fn run_linter(
    files: &[PathBuf],
    config: &ResolvedConfig,
    registry: &RuleRegistry,
    args: &Args,
) -> LintResult {
    let diagnostics: Vec<Diagnostic> = files
        .par_iter()
        .flat_map(|path| match SourceFile::from_path(path) {
            Ok(source) => lint_source(&source, config, registry, args),
            Err(e) => {
                eprintln!("error: {e:#}");
                Vec::new()
            }
        })
        .collect();

    let mut sorted = diagnostics;
    sorted.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    LintResult {
        diagnostics: sorted,
        file_count: files.len(),
    }
}
