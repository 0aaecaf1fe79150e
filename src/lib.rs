//! v2dat - compiles rule-list text files into GeoSite/GeoIP routing databases.
//!
//! A data directory holds one rule list per file. Files whose name ends in
//! `site` (or any other name) are domain lists, files ending in `ip` are
//! address lists. Lists can pull in other lists with `include:<name>`.
//!
//! # Features
//!
//! - **Typed domain rules**: `domain:`, `full:`, `regex:` and `keyword:`
//!   patterns with `@key` / `@key=<int>` attributes
//! - **CIDR rules**: IPv4 and IPv6 addresses with optional prefix length
//! - **Include expansion**: cross-list includes with cycle protection
//! - **V2Ray/Xray wire format**: `GeoSiteList` and `GeoIPList` protobuf output
//! - **Side artifacts**: a category index and a Clash-style rule list
//!
//! # Quick Start
//!
//! ```ignore
//! use v2dat::{compile, load_dir, CompilerConfig};
//!
//! let config = CompilerConfig::new("data").with_output_dir("out");
//! let report = load_dir(&config.data_path)?;
//! let compilation = compile(&report.registry)?;
//! compilation.write_to(&config.output_dir)?;
//! ```
//!
//! # Rule Format
//!
//! ```text
//! # comment
//! example.com                 # domain suffix
//! full:www.example.com        # exact match
//! regex:^ads?\.example\.      # regular expression
//! keyword:tracker             # substring
//! include:other-site          # entries of OTHER-SITE at this position
//! ads.example @cn @score=5    # attributes
//! ```

mod error;

pub mod address;
pub mod canonical;
pub mod compiler;
pub mod config;
pub mod emitter;
pub mod entry;
pub mod loader;
pub mod parser;
pub mod proto;
pub mod resolver;

// Re-export core types
pub use error::{AddressError, Error, ParseError, Result};
pub use entry::{Attribute, AttributeValue, Entry, EntryKind, FileClass, RawList};

// Re-export the pipeline stages
pub use address::{parse_cidr, Cidr};
pub use canonical::{to_geoip, to_geosite};
pub use compiler::{compile, load_dir, read_ip_list, read_site_list, run, Compilation, LoadReport};
pub use config::CompilerConfig;
pub use emitter::{CategoryIndex, PacList};
pub use loader::{load_file, load_reader};
pub use resolver::{resolve, Registry, ResolvedList};
