//! Rule line parsing.
//!
//! Site lines have the form `<spec>( <attr>)*` where `<spec>` is either a
//! bare pattern or `<prefix>:<pattern>`, and every `<attr>` is `@key` or
//! `@key=<int>`. IP lines carry a single address or `<anything>:<name>`,
//! which is read as an include directive.

use crate::entry::{Attribute, AttributeValue, Entry, EntryKind};
use crate::error::ParseError;

/// Strip surrounding whitespace and a trailing `#` comment.
///
/// Returns `None` when nothing is left.
pub fn clean_line(line: &str) -> Option<&str> {
    let line = line.trim();
    let line = match line.find('#') {
        Some(idx) => line[..idx].trim(),
        None => line,
    };
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Parse one cleaned line of a site list.
pub fn parse_site_line(line: &str) -> Result<Entry, ParseError> {
    let mut parts = line.trim().split(' ');
    // `split` always yields at least one item
    let spec = parts.next().unwrap_or_default();

    let mut entry = parse_domain_spec(spec)?;
    for token in parts {
        entry.attributes.push(parse_attribute(token)?);
    }
    Ok(entry)
}

/// Parse one cleaned line of an IP list.
///
/// Only the first token is looked at.
pub fn parse_ip_line(line: &str) -> Result<Entry, ParseError> {
    let token = line.trim().split(' ').next().unwrap_or_default();
    let segments: Vec<&str> = token.split(':').collect();

    match segments.as_slice() {
        [addr] => Ok(Entry::new(EntryKind::Ip, addr.to_lowercase())),
        // Any two-segment token is an include, whatever the prefix says
        [_, name] => Ok(Entry::new(EntryKind::Include, name.to_lowercase())),
        _ => Err(ParseError::InvalidFormat(token.to_string())),
    }
}

/// Parse a domain pattern specifier such as `full:www.example.com`.
pub fn parse_domain_spec(spec: &str) -> Result<Entry, ParseError> {
    let segments: Vec<&str> = spec.split(':').collect();

    match segments.as_slice() {
        [pattern] => Ok(Entry::new(EntryKind::Domain, pattern.to_lowercase())),
        [prefix, pattern] => Ok(Entry::new(
            EntryKind::from_prefix(prefix),
            pattern.to_lowercase(),
        )),
        _ => Err(ParseError::InvalidFormat(spec.to_string())),
    }
}

/// Parse an attribute token such as `@cn` or `@score=5`.
///
/// The key is lowercased and keeps its leading `@`.
pub fn parse_attribute(token: &str) -> Result<Attribute, ParseError> {
    if !token.starts_with('@') {
        return Err(ParseError::InvalidAttribute(token.to_string()));
    }

    match token.split_once('=') {
        None => Ok(Attribute {
            key: token.to_lowercase(),
            value: AttributeValue::Bool(true),
        }),
        Some((key, value)) => {
            let value = value
                .parse::<i64>()
                .map_err(|e| ParseError::InvalidAttribute(format!("{}: {}", token, e)))?;
            Ok(Attribute {
                key: key.to_lowercase(),
                value: AttributeValue::Int(value),
            })
        }
    }
}
