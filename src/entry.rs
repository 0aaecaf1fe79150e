//! Entry, attribute and list type definitions.

use std::fmt;

/// EntryKind represents the type of a parsed rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryKind {
    /// Two-segment specifier with an unrecognized prefix
    #[default]
    Unknown,
    /// Domain suffix match
    Domain,
    /// Regular expression match
    Regex,
    /// Substring ("plain") match
    Keyword,
    /// Exact match
    Full,
    /// Bare IP address
    Ip,
    /// IP address with explicit prefix
    IpSubnet,
    /// Reference to another named list
    Include,
}

impl EntryKind {
    /// Parse a domain specifier prefix (case-insensitive).
    ///
    /// Returns `Unknown` for prefixes that are not recognized.
    pub fn from_prefix(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "domain" => EntryKind::Domain,
            "regex" => EntryKind::Regex,
            "keyword" => EntryKind::Keyword,
            "full" => EntryKind::Full,
            "include" => EntryKind::Include,
            _ => EntryKind::Unknown,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Unknown => "unknown",
            EntryKind::Domain => "domain",
            EntryKind::Regex => "regex",
            EntryKind::Keyword => "keyword",
            EntryKind::Full => "full",
            EntryKind::Ip => "ip",
            EntryKind::IpSubnet => "ip-subnet",
            EntryKind::Include => "include",
        }
    }

    /// Whether this kind is matched against addresses.
    pub fn is_ip(&self) -> bool {
        matches!(self, EntryKind::Ip | EntryKind::IpSubnet)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value carried by an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
}

/// An `@`-prefixed tag attached to a domain entry.
///
/// The key keeps its leading `@`, which is what ends up on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: AttributeValue,
}

impl Attribute {
    /// Create a boolean attribute set to `true`.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: AttributeValue::Bool(true),
        }
    }

    /// Create an integer attribute.
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self {
            key: key.into(),
            value: AttributeValue::Int(value),
        }
    }
}

/// A single parsed rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub kind: EntryKind,
    /// Lowercased pattern, address or include target
    pub value: String,
    /// Only populated for domain-class entries
    pub attributes: Vec<Attribute>,
}

impl Entry {
    /// Create an entry without attributes.
    pub fn new(kind: EntryKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Whether this entry is an include directive.
    pub fn is_include(&self) -> bool {
        self.kind == EntryKind::Include
    }
}

/// Class of a list file, decided by its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileClass {
    /// Domain rules, compiled into GeoSite
    #[default]
    Site,
    /// Address rules, compiled into GeoIP
    Ip,
}

impl FileClass {
    /// Classify a file by its base name.
    ///
    /// Names ending in `site` are site lists, names ending in `ip` are IP
    /// lists, anything else falls back to a site list.
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with("site") {
            FileClass::Site
        } else if name.ends_with("ip") {
            FileClass::Ip
        } else {
            FileClass::Site
        }
    }
}

/// A list as loaded from one file, before include expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawList {
    /// Upper-cased base file name
    pub name: String,
    pub class: FileClass,
    /// Entries in textual order
    pub entries: Vec<Entry>,
}

impl RawList {
    /// Create an empty list.
    pub fn new(name: impl Into<String>, class: FileClass) -> Self {
        Self {
            name: name.into(),
            class,
            entries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_from_prefix() {
        assert_eq!(EntryKind::from_prefix("domain"), EntryKind::Domain);
        assert_eq!(EntryKind::from_prefix("REGEX"), EntryKind::Regex);
        assert_eq!(EntryKind::from_prefix("Keyword"), EntryKind::Keyword);
        assert_eq!(EntryKind::from_prefix("full"), EntryKind::Full);
        assert_eq!(EntryKind::from_prefix("include"), EntryKind::Include);
        assert_eq!(EntryKind::from_prefix("ext"), EntryKind::Unknown);
    }

    #[test]
    fn test_file_class() {
        assert_eq!(FileClass::from_file_name("cn-site"), FileClass::Site);
        assert_eq!(FileClass::from_file_name("cn-ip"), FileClass::Ip);
        assert_eq!(FileClass::from_file_name("private"), FileClass::Site);
        assert_eq!(FileClass::from_file_name("google.txt"), FileClass::Site);
        // Suffix check is case-sensitive on the raw file name
        assert_eq!(FileClass::from_file_name("CN-IP"), FileClass::Site);
    }

    #[test]
    fn test_ip_kinds() {
        assert!(EntryKind::Ip.is_ip());
        assert!(EntryKind::IpSubnet.is_ip());
        assert!(!EntryKind::Domain.is_ip());
        assert!(!EntryKind::Include.is_ip());
    }
}
