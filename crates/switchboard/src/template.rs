//! URI templates with `{variable}` placeholders.
//!
//! A template is compiled once into literal and variable segments. Matching
//! walks the URI left to right: literals must match byte-for-byte, and a
//! variable captures everything up to the first occurrence of the literal
//! that follows it (or the rest of the URI when it is the last segment).
//! There is no backtracking.

use std::collections::HashMap;
use std::fmt;

use crate::types::{RegistryError, RegistryResult, TemplateVariables};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A compiled URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pattern: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Compile a pattern such as `file://{name}.log`.
    pub fn parse(pattern: &str) -> RegistryResult<Self> {
        let invalid = |reason: &str| RegistryError::InvalidTemplate {
            template: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("template is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = pattern;

        while !rest.is_empty() {
            let Some(open) = rest.find(&['{', '}'][..]) else {
                segments.push(Segment::Literal(rest.to_string()));
                break;
            };

            if rest.as_bytes()[open] == b'}' {
                return Err(invalid("'}' without matching '{'"));
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }

            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("'{' is never closed"))?;
            let name = &after[..close];

            if name.is_empty() {
                return Err(invalid("variable name is empty"));
            }
            if name.contains('{') {
                return Err(invalid("variables cannot be nested"));
            }
            if matches!(segments.last(), Some(Segment::Variable(_))) {
                return Err(invalid("adjacent variables need a literal between them"));
            }
            if segments
                .iter()
                .any(|s| matches!(s, Segment::Variable(v) if v == name))
            {
                return Err(invalid(&format!("variable '{name}' appears twice")));
            }

            segments.push(Segment::Variable(name.to_string()));
            rest = &after[close + 1..];
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// The original pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Variable names in the order they appear.
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Variable(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Match `uri` against this template, returning the captured variables.
    ///
    /// Variables never capture an empty string, and the whole URI must be
    /// consumed for a match.
    pub fn matches(&self, uri: &str) -> Option<TemplateVariables> {
        let mut vars = HashMap::new();
        let mut pos = 0;

        for (i, segment) in self.segments.iter().enumerate() {
            let remaining = &uri[pos..];
            match segment {
                Segment::Literal(literal) => {
                    if !remaining.starts_with(literal.as_str()) {
                        return None;
                    }
                    pos += literal.len();
                }
                Segment::Variable(name) => {
                    let end = match self.segments.get(i + 1) {
                        Some(Segment::Literal(next)) => remaining.find(next.as_str())?,
                        _ => remaining.len(),
                    };
                    if end == 0 {
                        return None;
                    }
                    vars.insert(name.clone(), remaining[..end].to_string());
                    pos += end;
                }
            }
        }

        (pos == uri.len()).then_some(vars)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
