//! Compiled expression patterns used by the checker.

use crate::error::{PydeltaError, Result};
use crate::scanner::{find_outside_quotes, is_inside_quotes};
use regex::{Match, Regex};

/// Regexes for the expression-level rules, compiled once per run.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    lambda: Regex,
    loop_clause: Regex,
    condition: Regex,
    alternative: Regex,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        PydeltaError::UserError(format!("invalid standard pattern '{}': {}", pattern, e))
    })
}

impl CompiledPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            lambda: compile(r"\blambda\b")?,
            loop_clause: compile(r"\sfor\s")?,
            condition: compile(r"\sif\s")?,
            alternative: compile(r"\selse\s")?,
        })
    }

    /// A `;` outside quotes followed by anything but a comment.
    pub fn has_multiple_statements(&self, text: &str) -> bool {
        let mut from = 0;
        while let Some(pos) = find_outside_quotes(text, ";", from, false) {
            let rest = text[pos + 1..].trim();
            if !rest.is_empty() && !rest.starts_with('#') {
                return true;
            }
            from = pos + 1;
        }
        false
    }

    /// More than one comprehension clause, more than one conditional
    /// expression, or one of each.
    pub fn has_nested_operators(&self, text: &str) -> bool {
        let loops = outside_quotes(text, &self.loop_clause).count();
        let conditionals = self.conditional_expressions(text);
        loops > 1 || conditionals > 1 || (loops > 0 && conditionals > 0)
    }

    /// `if` clauses with an `else` somewhere after them. A comprehension
    /// filter (`if` alone) is not a conditional expression.
    fn conditional_expressions(&self, text: &str) -> usize {
        let alternatives: Vec<usize> = outside_quotes(text, &self.alternative)
            .map(|m| m.start())
            .collect();
        outside_quotes(text, &self.condition)
            .filter(|m| alternatives.iter().any(|&at| at >= m.end()))
            .count()
    }

    /// `lambda` outside quotes followed by a `:` and a body.
    pub fn has_lambda(&self, text: &str) -> bool {
        outside_quotes(text, &self.lambda).any(|m| {
            find_outside_quotes(text, ":", m.end(), false).is_some_and(|colon| {
                let body = text[colon + 1..].trim();
                !body.is_empty() && !body.starts_with('#')
            })
        })
    }
}

fn outside_quotes<'t>(text: &'t str, regex: &'t Regex) -> impl Iterator<Item = Match<'t>> {
    regex
        .find_iter(text)
        .filter(move |m| !is_inside_quotes(text, m.start(), false))
}
