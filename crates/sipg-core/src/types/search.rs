use super::GeoLocation;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::net::Ipv4Addr;

/// Number of characters of the raw banner kept in [`MatchDetails`]
pub const DETAIL_DATA_CHARS: usize = 200;

/// One page of results from /shodan/host/search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Total number of results for the query (all pages)
    #[serde(default)]
    pub total: u64,

    /// Matches on this page, in API order
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

impl SearchPage {
    /// Returns true if there are no matches on this page
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the number of matches on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

/// Individual match (banner) in search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// IP address as reported by the API (IPv4 or IPv6)
    #[serde(default, deserialize_with = "lenient_string")]
    pub ip_str: Option<String>,

    /// Port number
    #[serde(default, deserialize_with = "lenient_port")]
    pub port: Option<u16>,

    /// Organization that owns the IP
    #[serde(default, deserialize_with = "lenient_string")]
    pub org: Option<String>,

    /// Hostnames associated with this IP
    #[serde(default, deserialize_with = "lenient_strings")]
    pub hostnames: Vec<String>,

    /// Domains associated with this IP
    #[serde(default, deserialize_with = "lenient_strings")]
    pub domains: Vec<String>,

    /// Geographic location
    #[serde(default)]
    pub location: Option<GeoLocation>,

    /// Timestamp of the banner
    #[serde(default)]
    pub timestamp: Option<String>,

    /// SSL data if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<serde_json::Value>,

    /// HTTP data if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<serde_json::Value>,

    /// Raw banner data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Every other field of the banner, kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// A single odd field must not fail the whole page. Values of the wrong
// type read as absent; the record is then judged by `ipv4()` like any other.

fn lenient_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_port<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u16>, D::Error> {
    Ok(Value::deserialize(de)?
        .as_u64()
        .and_then(|p| u16::try_from(p).ok()))
}

fn lenient_strings<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

impl MatchRecord {
    /// The IPv4 address of this match, if `ip_str` is a dotted quad
    #[must_use]
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ip_str.as_deref().and_then(|s| s.parse().ok())
    }

    /// Project into the detailed view
    #[must_use]
    pub fn details(&self) -> MatchDetails {
        MatchDetails {
            ip: self.ip_str.clone().unwrap_or_default(),
            port: self.port,
            hostnames: self.hostnames.clone(),
            org: self.org.clone(),
            location: self.location.clone().unwrap_or_default(),
            timestamp: self.timestamp.clone(),
            domains: self.domains.clone(),
            ssl: self.ssl.clone(),
            http: self.http.clone(),
            data: self
                .data
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(DETAIL_DATA_CHARS)
                .collect(),
        }
    }
}

/// A match that passed IPv4 validation, as yielded by the walker
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// 1-based position among all yielded hits of one walk
    pub index: u64,

    /// Page the match came from
    pub page: u32,

    /// Validated address
    pub ip: Ipv4Addr,

    /// The full record
    pub record: MatchRecord,
}

impl Hit {
    /// The `https://<ip>` form written by the ip-only sink
    #[must_use]
    pub fn url(&self) -> String {
        format!("https://{}", self.ip)
    }
}

/// Detailed projection of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    /// IP address
    pub ip: String,

    /// Port number
    pub port: Option<u16>,

    /// Hostnames
    pub hostnames: Vec<String>,

    /// Organization
    pub org: Option<String>,

    /// Location (empty when unknown)
    pub location: GeoLocation,

    /// Banner timestamp
    pub timestamp: Option<String>,

    /// Domains
    pub domains: Vec<String>,

    /// SSL data
    pub ssl: Option<serde_json::Value>,

    /// HTTP data
    pub http: Option<serde_json::Value>,

    /// Leading part of the raw banner
    pub data: String,
}
