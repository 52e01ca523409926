//! Low-level configuration syntax.
//!
//! The file format is `key = value` lines with `#` comments, ASCII
//! case-insensitive keys, and *set* values: comma-separated elements inside
//! braces, where an element is an effect name optionally followed by
//! parenthesized attribute names. A set may span multiple lines until its
//! closing brace.
//!
//! This module only tokenizes; typing a scalar and resolving effect names
//! happen in [`crate::config`].
use crate::config::errors::{ConfigError, ConfigResult};

/// One `key = value` occurrence with its line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    pub value: Value,
    pub line: usize,
}

/// A raw configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Set(Vec<SetElement>),
}

/// One element of a set value: `Name` or `Name(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetElement {
    pub name: String,
    pub args: Vec<String>,
}

/// Tokenize the whole configuration text into entries.
pub fn parse_entries(text: &str) -> ConfigResult<Vec<Entry>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut entries = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let line_no = idx + 1;
        let line = strip_comment(lines[idx]);
        idx += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            return Err(ConfigError::MissingEquals { line: line_no });
        };
        let key = raw_key.trim().to_string();
        if key.is_empty() {
            return Err(ConfigError::MissingEquals { line: line_no });
        }
        let mut value = raw_value.trim().to_string();
        if value.starts_with('{') {
            // Consume further lines until the closing brace.
            while !value.contains('}') {
                if idx >= lines.len() {
                    return Err(ConfigError::UnterminatedSet { key, line: line_no });
                }
                value.push(' ');
                value.push_str(strip_comment(lines[idx]).trim());
                idx += 1;
            }
            let inner = value
                .trim()
                .strip_prefix('{')
                .and_then(|v| v.strip_suffix('}'))
                .ok_or(ConfigError::UnterminatedSet { key: key.clone(), line: line_no })?
                .to_string();
            let elements = parse_set_elements(&inner, &key, line_no)?;
            entries.push(Entry { key, value: Value::Set(elements), line: line_no });
        } else {
            entries.push(Entry { key, value: Value::Scalar(value), line: line_no });
        }
    }
    Ok(entries)
}

/// Split set contents on top-level commas (commas inside parentheses
/// separate an element's attribute arguments, not elements).
fn parse_set_elements(inner: &str, key: &str, line: usize) -> ConfigResult<Vec<SetElement>> {
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars().chain(std::iter::once(',')) {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| ConfigError::MalformedSetElement {
                    key: key.to_string(),
                    line,
                    element: current.clone(),
                })?;
                current.push(c);
            }
            ',' if depth == 0 => {
                let piece = current.trim();
                if !piece.is_empty() {
                    elements.push(parse_set_element(piece, key, line)?);
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return Err(ConfigError::MalformedSetElement {
            key: key.to_string(),
            line,
            element: current,
        });
    }
    Ok(elements)
}

fn parse_set_element(piece: &str, key: &str, line: usize) -> ConfigResult<SetElement> {
    let malformed = || ConfigError::MalformedSetElement {
        key: key.to_string(),
        line,
        element: piece.to_string(),
    };
    match piece.split_once('(') {
        None => {
            if piece.contains(')') {
                return Err(malformed());
            }
            Ok(SetElement { name: piece.to_string(), args: Vec::new() })
        }
        Some((name, rest)) => {
            let name = name.trim();
            let args_text = rest.strip_suffix(')').ok_or_else(malformed)?;
            if name.is_empty() || args_text.contains(['(', ')']) {
                return Err(malformed());
            }
            let args: Vec<String> = args_text
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect();
            if args.is_empty() {
                return Err(malformed());
            }
            Ok(SetElement { name: name.to_string(), args })
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
