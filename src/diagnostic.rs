use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn letter(&self) -> char {
        match self {
            Severity::Hidden => 'H',
            Severity::Info => 'I',
            Severity::Warning => 'W',
            Severity::Error => 'E',
        }
    }

    pub fn from_str(s: &str) -> Option<Severity> {
        match s.to_lowercase().as_str() {
            "hidden" => Some(Severity::Hidden),
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A source position attributed to a diagnostic. Line and column are both
/// 1-indexed, column counted in characters (editor convention).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

/// A finding produced by a rule.
///
/// `locations` is never empty; the first entry is the primary location used
/// for display and ordering. Most rules, including all currently shipped
/// ones, attach exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule_name: String,
    pub severity: Severity,
    pub message: String,
    pub locations: Vec<Location>,
}

impl Diagnostic {
    pub fn new(
        rule_name: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            severity,
            message: message.into(),
            locations: vec![location],
        }
    }

    pub fn primary(&self) -> &Location {
        &self.locations[0]
    }

    pub fn sort_key(&self) -> (&str, usize, usize) {
        let loc = self.primary();
        (&loc.path, loc.line, loc.column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = self.primary();
        write!(
            f,
            "{}:{}:{}: {}: {}: {}",
            loc.path, loc.line, loc.column, self.severity, self.rule_name, self.message,
        )
    }
}
