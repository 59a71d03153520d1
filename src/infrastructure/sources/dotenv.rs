//! Parser for dotenv-format files (`KEY=value` per line).
//!
//! Values are returned verbatim apart from quoting; `${...}` references are
//! left for the interpolation pass so file values and environment values are
//! interpolated by the same rules.

use std::collections::BTreeMap;

/// A parse failure, reported by line number only so secret values never leak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotenvError {
    pub line: usize,
    pub reason: &'static str,
}

impl std::fmt::Display for DotenvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

pub fn is_valid_key(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

pub fn parse(content: &str) -> Result<BTreeMap<String, String>, DotenvError> {
    let mut values = BTreeMap::new();

    for (i, line) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").map_or(line, str::trim_start);

        let Some((key, value)) = line.split_once('=') else {
            return Err(DotenvError {
                line: line_no,
                reason: "expected KEY=value",
            });
        };
        let key = key.trim();
        if !is_valid_key(key) {
            return Err(DotenvError {
                line: line_no,
                reason: "invalid key name",
            });
        }

        let value = parse_value(value.trim()).ok_or(DotenvError {
            line: line_no,
            reason: "unterminated quoted value",
        })?;
        values.insert(key.to_string(), value);
    }

    Ok(values)
}

fn parse_value(value: &str) -> Option<String> {
    if let Some(rest) = value.strip_prefix('"') {
        let inner = rest.strip_suffix('"')?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(other) => out.push(other),
                    None => out.push('\\'),
                }
            } else {
                out.push(c);
            }
        }
        return Some(out);
    }
    if let Some(rest) = value.strip_prefix('\'') {
        return rest.strip_suffix('\'').map(str::to_string);
    }
    // Unquoted: an inline comment starts at " #"
    let value = value.find(" #").map_or(value, |pos| &value[..pos]);
    Some(value.trim_end().to_string())
}
