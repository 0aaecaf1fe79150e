//! Text side artifacts: the category index and the PAC-style rule list.

use std::fmt;

use crate::entry::{FileClass, RawList};

/// Lowercased list names, split by class, in iteration order.
///
/// Rendered as the `v2map.txt` artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    pub site: Vec<String>,
    pub ip: Vec<String>,
}

impl CategoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a list under its class.
    pub fn record(&mut self, list: &RawList) {
        let name = list.name.to_lowercase();
        match list.class {
            FileClass::Site => self.site.push(name),
            FileClass::Ip => self.ip.push(name),
        }
    }
}

impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "v2site:")?;
        for name in &self.site {
            writeln!(f, "    {}", name)?;
        }
        writeln!(f, "v2ip:")?;
        for name in &self.ip {
            writeln!(f, "    {}", name)?;
        }
        Ok(())
    }
}

/// Clash-style rule lines built from the raw (unresolved) lists.
///
/// Rendered as the `v2yaml.yaml` artifact. Every IP value gets a literal
/// `/32` appended, including IPv6 values and values that already carry a
/// prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacList {
    lines: Vec<String>,
}

impl PacList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header line and one rule line per raw entry.
    pub fn record(&mut self, list: &RawList) {
        let name = list.name.to_lowercase();
        match list.class {
            FileClass::Site => {
                self.lines.push(format!("# Domain:{}", name));
                for entry in &list.entries {
                    self.lines
                        .push(format!("- DOMAIN-SUFFIX,{},Proxy", entry.value));
                }
            }
            FileClass::Ip => {
                self.lines.push(format!("# IP:{}", name));
                for entry in &list.entries {
                    self.lines.push(format!("- IP-CIDR,{}/32,Proxy", entry.value));
                }
            }
        }
    }

    /// The rendered lines, without terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for PacList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
