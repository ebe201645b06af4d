//! Core types for standard check results.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    EmptyFile,
    EmptyBlock,
    MultipleStatements,
    NestedOperators,
    Lambda,
    LongLine,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rule::EmptyFile => "file must contain at least one line of code",
            Rule::EmptyBlock => "block must have content",
            Rule::MultipleStatements => "multiple statements on one line",
            Rule::NestedOperators => "nested comprehension or conditional expression",
            Rule::Lambda => "lambda expressions are not allowed",
            Rule::LongLine => "line too long",
        };
        f.write_str(text)
    }
}

/// One finding, tied to a physical line when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    /// 1-based physical line number.
    pub line: Option<usize>,
    /// Offending statement or line.
    pub content: String,
}

impl Violation {
    pub fn new(rule: Rule, line: Option<usize>, content: impl Into<String>) -> Self {
        Self {
            rule,
            line,
            content: content.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.rule)?,
            None => write!(f, "{}", self.rule)?,
        }
        if !self.content.is_empty() {
            write!(f, ": {}", self.content)?;
        }
        Ok(())
    }
}

/// Result of checking one file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardReport {
    pub violations: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl StandardReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Formats the violations as a user-facing message.
    ///
    /// ```text
    /// 2 coding standard violation(s)
    ///
    /// line 3: multiple statements on one line: x = 1; y = 2
    /// line 7: lambda expressions are not allowed: key = lambda v: v[0]
    /// ```
    pub fn format_error(&self) -> String {
        if self.passed() {
            return String::new();
        }

        let mut msg = format!("{} coding standard violation(s)\n\n", self.violations.len());
        for violation in &self.violations {
            msg.push_str(&format!("{}\n", violation));
        }
        msg
    }
}
