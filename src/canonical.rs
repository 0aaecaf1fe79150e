//! Mapping of resolved lists onto the GeoSite / GeoIP wire messages.

use crate::address::parse_cidr;
use crate::entry::{Attribute, AttributeValue, EntryKind};
use crate::proto::{self, domain};
use crate::resolver::ResolvedList;
use crate::{Error, Result};

/// Build the GeoSite message for a resolved site list.
///
/// Fails on any entry that is not a domain, regex, keyword or full rule.
pub fn to_geosite(list: &ResolvedList) -> Result<proto::GeoSite> {
    let mut domains = Vec::with_capacity(list.entries.len());

    for entry in &list.entries {
        let kind = match entry.kind {
            EntryKind::Domain => domain::Type::Domain,
            EntryKind::Regex => domain::Type::Regex,
            EntryKind::Keyword => domain::Type::Plain,
            EntryKind::Full => domain::Type::Full,
            _ => return Err(Error::UnknownDomainType(list.name.clone())),
        };

        domains.push(proto::Domain {
            r#type: kind as i32,
            value: entry.value.clone(),
            attribute: entry.attributes.iter().map(to_wire_attribute).collect(),
        });
    }

    Ok(proto::GeoSite {
        country_code: list.name.clone(),
        domain: domains,
    })
}

/// Build the GeoIP message for a resolved IP list.
///
/// Entries whose address does not parse are dropped; non-address entries are
/// ignored.
pub fn to_geoip(list: &ResolvedList) -> proto::GeoIp {
    let cidr = list
        .entries
        .iter()
        .filter(|entry| entry.kind.is_ip())
        .filter_map(|entry| match parse_cidr(&entry.value) {
            Ok(cidr) => Some(proto::Cidr {
                ip: cidr.ip,
                prefix: cidr.prefix,
            }),
            Err(e) => {
                log::debug!("{}: dropping {}: {}", list.name, entry.value, e);
                None
            }
        })
        .collect();

    proto::GeoIp {
        country_code: list.name.clone(),
        cidr,
    }
}

fn to_wire_attribute(attr: &Attribute) -> domain::Attribute {
    let typed_value = match attr.value {
        AttributeValue::Bool(b) => domain::attribute::TypedValue::BoolValue(b),
        AttributeValue::Int(i) => domain::attribute::TypedValue::IntValue(i),
    };
    domain::Attribute {
        key: attr.key.clone(),
        typed_value: Some(typed_value),
    }
}
