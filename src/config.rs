use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_yml::Value;

use crate::diagnostic::Severity;
use crate::rule::RuleConfig;

/// Resolved configuration from .sharpcop.yml.
///
/// Reads a single YAML file, extracting per-rule Enabled/Severity and
/// AllRules.Exclude. Rules not mentioned in the file run with defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Per-rule configs keyed by rule name (e.g. "Readability/ParameterListMustFollowDeclaration")
    rule_configs: HashMap<String, RuleConfig>,
    global_excludes: Vec<String>,
}

impl ResolvedConfig {
    fn empty() -> Self {
        Self {
            rule_configs: HashMap::new(),
            global_excludes: Vec::new(),
        }
    }

    pub fn is_rule_enabled(&self, name: &str) -> bool {
        match self.rule_configs.get(name) {
            Some(config) => config.enabled,
            None => true, // enabled by default
        }
    }

    /// Get the resolved config for a specific rule.
    pub fn rule_config(&self, name: &str) -> RuleConfig {
        self.rule_configs.get(name).cloned().unwrap_or_default()
    }

    /// Global exclude patterns from AllRules.Exclude.
    pub fn global_excludes(&self) -> &[String] {
        &self.global_excludes
    }
}

/// Load config from the given path, or look for `.sharpcop.yml` in the
/// current directory. Returns the default config if the file doesn't exist.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Path::new(".sharpcop.yml").to_path_buf(),
    };

    if !config_path.exists() {
        return Ok(ResolvedConfig::empty());
    }

    let contents = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;
    let raw: Value =
        serde_yml::from_str(&contents).with_context(|| "failed to parse .sharpcop.yml")?;

    let mut rule_configs = HashMap::new();
    let mut global_excludes = Vec::new();

    if let Value::Mapping(map) = &raw {
        for (key, value) in map {
            let key_str = match key.as_str() {
                Some(s) => s,
                None => continue,
            };

            if key_str == "AllRules" {
                if let Some(excludes) = extract_string_list(value, "Exclude") {
                    global_excludes = excludes;
                }
                continue;
            }

            // Rule names contain "/" (e.g. "Readability/ParameterListMustFollowDeclaration")
            if key_str.contains('/') {
                rule_configs.insert(key_str.to_string(), parse_rule_config(value));
            }
        }
    }

    Ok(ResolvedConfig {
        rule_configs,
        global_excludes,
    })
}

fn parse_rule_config(value: &Value) -> RuleConfig {
    let mut config = RuleConfig::default();

    if let Value::Mapping(map) = value {
        for (k, v) in map {
            match k.as_str() {
                Some("Enabled") => {
                    if let Some(b) = v.as_bool() {
                        config.enabled = b;
                    }
                }
                Some("Severity") => {
                    if let Some(s) = v.as_str() {
                        config.severity = Severity::from_str(s);
                    }
                }
                _ => {}
            }
        }
    }

    config
}

fn extract_string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    value
        .as_mapping()?
        .get(key)?
        .as_sequence()
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
}
