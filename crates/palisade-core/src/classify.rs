//! Indicator classification: IP literal, FQDN, or bare hostname.
//!
//! Classification is strict on purpose. IPv4 must be a full dotted quad
//! (optional `/0`–`/32` suffix); IPv6 must be the expanded 8-group
//! colon-hex form (optional `/0`–`/128` suffix). Compressed IPv6 (`::`)
//! is NOT recognized and falls through to FQDN/hostname classification;
//! firewall EDL consumers expect the expanded form, and a lenient parser
//! would silently change which list such tokens land on.

use serde::{Deserialize, Serialize};

/// What shape of network identifier a token is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Ip,
    Hostname,
    Fqdn,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Kind::Ip => "ip",
            Kind::Hostname => "hostname",
            Kind::Fqdn => "fqdn",
        };
        write!(f, "{s}")
    }
}

/// Classify a token. Deterministic, no I/O.
pub fn classify(token: &str) -> Kind {
    if is_ipv4(token) || is_ipv6(token) {
        return Kind::Ip;
    }

    // ≥2 non-empty dot-separated labels make an FQDN; anything else is
    // a bare hostname.
    let labels = token.split('.').filter(|l| !l.is_empty()).count();
    if token.contains('.') && labels >= 2 {
        Kind::Fqdn
    } else {
        Kind::Hostname
    }
}

/// Strict dotted-quad IPv4, optionally with a `/0`–`/32` CIDR suffix.
fn is_ipv4(token: &str) -> bool {
    let addr = match split_cidr(token, 32) {
        Some(addr) => addr,
        None => return false,
    };

    let octets: Vec<&str> = addr.split('.').collect();
    if octets.len() != 4 {
        return false;
    }
    octets.iter().all(|o| is_decimal_octet(o))
}

/// Strict 8-group colon-hex IPv6, optionally with a `/0`–`/128` suffix.
fn is_ipv6(token: &str) -> bool {
    let addr = match split_cidr(token, 128) {
        Some(addr) => addr,
        None => return false,
    };

    let groups: Vec<&str> = addr.split(':').collect();
    if groups.len() != 8 {
        return false;
    }
    groups
        .iter()
        .all(|g| (1..=4).contains(&g.len()) && g.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Split off an optional `/prefix` suffix, validating it against `max`.
/// Returns the address part, or `None` when the suffix is malformed.
fn split_cidr(token: &str, max: u8) -> Option<&str> {
    match token.split_once('/') {
        None => Some(token),
        Some((addr, prefix)) => {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let prefix: u32 = prefix.parse().ok()?;
            (prefix <= max as u32).then_some(addr)
        }
    }
}

/// A decimal octet: 1–3 digits, value 0–255.
fn is_decimal_octet(s: &str) -> bool {
    if s.is_empty() || s.len() > 3 || !s.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    s.parse::<u16>().map(|v| v <= 255).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_ipv4() {
        assert_eq!(classify("192.0.2.1"), Kind::Ip);
        assert_eq!(classify("0.0.0.0"), Kind::Ip);
        assert_eq!(classify("255.255.255.255"), Kind::Ip);
    }

    #[test]
    fn classifies_ipv4_cidr() {
        assert_eq!(classify("10.0.0.0/8"), Kind::Ip);
        assert_eq!(classify("192.0.2.0/32"), Kind::Ip);
        assert_eq!(classify("198.51.100.0/0"), Kind::Ip);
    }

    #[test]
    fn rejects_invalid_ipv4() {
        // Out-of-range octet → not an IP, but still dotted labels.
        assert_eq!(classify("256.1.1.1"), Kind::Fqdn);
        // Too few octets.
        assert_eq!(classify("10.0.1"), Kind::Fqdn);
        // Prefix out of range; the dotted labels still read as an FQDN.
        assert_eq!(classify("10.0.0.0/33"), Kind::Fqdn);
    }

    #[test]
    fn classifies_expanded_ipv6() {
        assert_eq!(
            classify("2001:0db8:0000:0000:0000:0000:0000:0001"),
            Kind::Ip
        );
        assert_eq!(classify("2001:db8:0:0:0:0:0:1"), Kind::Ip);
        assert_eq!(classify("2001:db8:0:0:0:0:0:0/64"), Kind::Ip);
    }

    #[test]
    fn compressed_ipv6_falls_through() {
        // The strict 8-group rule does not match `::` compression;
        // these tokens classify as hostnames (no dot present).
        assert_eq!(classify("::1"), Kind::Hostname);
        assert_eq!(classify("2001:db8::1"), Kind::Hostname);
    }

    #[test]
    fn classifies_fqdn() {
        assert_eq!(classify("evil.example.com"), Kind::Fqdn);
        assert_eq!(classify("c2.example"), Kind::Fqdn);
        // Dotted but not a valid IPv4 → FQDN.
        assert_eq!(classify("1.2.3.4.5"), Kind::Fqdn);
    }

    #[test]
    fn classifies_bare_hostname() {
        assert_eq!(classify("fileserver01"), Kind::Hostname);
        assert_eq!(classify("localhost"), Kind::Hostname);
        // A single label with a trailing dot has only one non-empty label.
        assert_eq!(classify("printer."), Kind::Hostname);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Fqdn).unwrap(), "\"fqdn\"");
        assert_eq!(serde_json::to_string(&Kind::Ip).unwrap(), "\"ip\"");
    }
}
