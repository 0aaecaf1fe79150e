//! Error types for v2dat.

use thiserror::Error;

/// Error type for v2dat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A rule line could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An address could not be turned into a CIDR
    #[error(transparent)]
    Address(#[from] AddressError),

    /// An include directive names a list that was never loaded
    #[error("{0} not found")]
    IncludeNotFound(String),

    /// A site list still holds an entry with no GeoSite counterpart
    #[error("unknown domain type: {0}")]
    UnknownDomainType(String),

    /// The configured data directory does not exist
    #[error("data path not found: {0}")]
    DataPathNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Protobuf decoding error
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Result type alias for v2dat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for rule line parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Pattern specifier split into zero or more than two segments
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Attribute token is not `@key` or `@key=<int>`
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
}

/// Error type for address parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Prefix is not a decimal integer or exceeds the family width
    #[error("invalid network mask: {0}")]
    InvalidMask(String),

    /// Text is neither an IPv4 nor an IPv6 address
    #[error("unsupported address: {0}")]
    Unsupported(String),
}
