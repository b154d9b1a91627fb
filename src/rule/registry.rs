use std::collections::HashMap;

use super::Rule;

pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build the default registry with all built-in rules.
    pub fn default_registry() -> Self {
        let mut registry = Self::new();
        super::readability::register_all(&mut registry);
        registry
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let name = rule.name();
        let idx = self.rules.len();
        self.rules.push(rule);
        self.index.insert(name, idx);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.index.get(name).map(|&idx| &*self.rules[idx])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::default_registry()
    }
}
