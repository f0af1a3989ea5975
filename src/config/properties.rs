//! Parser for `.properties` text.
//!
//! Supports the conventional line-oriented syntax: `key=value`, `key:value`
//! and `key value` pairs, `#` and `!` comment lines, backslash line
//! continuations, and `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes.

use std::collections::BTreeMap;
use std::str::Chars;

use super::ConfigError;

/// Flat key-value map produced by parsing a properties resource.
pub type Properties = BTreeMap<String, String>;

/// Parses properties text into a map. Later duplicates of a key win.
///
/// `resource` names the input in parse errors.
pub fn parse(resource: &str, contents: &str) -> Result<Properties, ConfigError> {
    let mut props = Properties::new();

    for (line, logical) in logical_lines(contents) {
        let error = |message: String| ConfigError::ParseError {
            resource: resource.to_string(),
            line,
            message,
        };

        let (key, value) = split_key_value(&logical);
        let key = unescape(key).map_err(&error)?;
        let value = unescape(value).map_err(&error)?;
        props.insert(key, value);
    }

    Ok(props)
}

/// Splits on `\n`, `\r\n` and lone `\r`.
fn natural_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

/// Joins continued lines and drops blanks and comments.
/// Each logical line is paired with the 1-based number of its first natural line.
fn logical_lines(contents: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut natural = natural_lines(contents).enumerate();

    while let Some((index, raw)) = natural.next() {
        let trimmed = trim_leading(raw);
        if trimmed.is_empty() || matches!(trimmed.chars().next(), Some('#' | '!')) {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match natural.next() {
                Some((_, next)) => logical.push_str(trim_leading(next)),
                None => break,
            }
        }

        lines.push((index + 1, logical));
    }

    lines
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn trim_leading(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

/// An odd run of trailing backslashes escapes the line terminator.
fn ends_with_continuation(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Returns the still-escaped key and value of a logical line.
fn split_key_value(line: &str) -> (&str, &str) {
    let key_end = find_key_end(line);
    let key = &line[..key_end];

    let rest = trim_leading(&line[key_end..]);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    (key, trim_leading(rest))
}

fn find_key_end(line: &str) -> usize {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            return i;
        }
    }
    line.len()
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => out.push(decode_unicode(&mut chars)?),
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Decodes the digits of a `\uXXXX` escape, joining UTF-16 surrogate pairs
/// written as two consecutive escapes.
fn decode_unicode(chars: &mut Chars<'_>) -> Result<char, String> {
    let unit = read_hex4(chars)?;

    if (0xD800..0xDC00).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low = read_hex4(&mut lookahead)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(code) {
                    return Ok(c);
                }
            }
        }
    }

    char::from_u32(unit).ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"))
}

fn read_hex4(chars: &mut Chars<'_>) -> Result<u32, String> {
    let mut unit = 0;
    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| "malformed \\uxxxx encoding".to_string())?;
        unit = unit * 16 + digit;
    }
    Ok(unit)
}
