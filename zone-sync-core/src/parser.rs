//! Record source parser
//!
//! Each non-empty line is `<TYPE> <value...>`, with a trailing priority token for MX:
//!
//! ```text
//! A 192.0.2.10
//! MX mail.example.net 10
//! TXT v=spf1 include:_spf.example.net -all
//! ```

use zone_sync_provider::{DnsRecordType, RecordData};

use crate::error::{ParseError, ValidationError};
use crate::types::{LineRejection, ParsedSource, RecordIntent};

/// Parse one subdomain's record source.
///
/// Invalid lines are collected in [`ParsedSource::rejected`] and never stop the rest of the
/// file. Only an unusable subdomain fails the whole source.
pub fn parse(subdomain: &str, raw_text: &str, zone_apex: &str) -> Result<ParsedSource, ParseError> {
    validate_subdomain(subdomain, zone_apex)?;
    let fqdn = format!("{subdomain}.{zone_apex}");

    let mut parsed = ParsedSource::default();
    for (idx, raw_line) in raw_text.lines().enumerate() {
        let text = raw_line.trim();
        if text.is_empty() {
            continue;
        }
        let line = idx + 1;
        match parse_line(text, zone_apex) {
            Ok(data) => parsed.intents.push(RecordIntent {
                subdomain: subdomain.to_string(),
                line,
                fqdn: fqdn.clone(),
                data,
            }),
            Err(error) => parsed.rejected.push(LineRejection {
                subdomain: subdomain.to_string(),
                line,
                text: text.to_string(),
                error,
            }),
        }
    }
    Ok(parsed)
}

fn validate_subdomain(subdomain: &str, zone_apex: &str) -> Result<(), ParseError> {
    if subdomain.is_empty() {
        return Err(ParseError::EmptySubdomain);
    }
    let valid_chars = subdomain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid_chars || subdomain.starts_with('.') || subdomain.ends_with('.') {
        return Err(ParseError::InvalidSubdomain(subdomain.to_string()));
    }
    if contains_ignore_case(subdomain, zone_apex) {
        return Err(ParseError::SubdomainContainsApex {
            subdomain: subdomain.to_string(),
            apex: zone_apex.to_string(),
        });
    }
    Ok(())
}

/// Parse one trimmed, non-empty line.
///
/// Checks run in order: type, MX priority, empty value, apex reference.
pub fn parse_line(text: &str, zone_apex: &str) -> Result<RecordData, ValidationError> {
    let (type_token, rest) = split_first_token(text);
    let record_type = DnsRecordType::from_name(type_token)
        .ok_or_else(|| ValidationError::UnknownRecordType(type_token.to_string()))?;

    Ok(match record_type {
        DnsRecordType::Mx => {
            let (value, priority_token) = split_last_token(rest);
            if priority_token.is_empty() {
                return Err(ValidationError::EmptyValue);
            }
            // 只接受纯数字：u16::from_str 会接受 "+10"
            let priority = priority_token
                .bytes()
                .all(|b| b.is_ascii_digit())
                .then(|| priority_token.parse::<u16>().ok())
                .flatten()
                .ok_or_else(|| ValidationError::InvalidPriority(priority_token.to_string()))?;
            RecordData::MX {
                priority,
                exchange: checked_value(value, zone_apex)?,
            }
        }
        DnsRecordType::A => RecordData::A {
            address: checked_value(rest, zone_apex)?,
        },
        DnsRecordType::Aaaa => RecordData::AAAA {
            address: checked_value(rest, zone_apex)?,
        },
        DnsRecordType::Cname => RecordData::CNAME {
            target: checked_value(rest, zone_apex)?,
        },
        DnsRecordType::Txt => RecordData::TXT {
            text: checked_value(rest, zone_apex)?,
        },
    })
}

fn checked_value(value: &str, zone_apex: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue);
    }
    if contains_ignore_case(value, zone_apex) {
        return Err(ValidationError::ReferencesManagedZone {
            apex: zone_apex.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// `"A  1.2.3.4"` -> `("A", "1.2.3.4")`; separator runs are dropped, the rest is kept verbatim.
fn split_first_token(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim_start()),
        None => (text, ""),
    }
}

/// `"mail.example.net  10"` -> `("mail.example.net", "10")`; a lone token is the last one.
fn split_last_token(text: &str) -> (&str, &str) {
    match text.rsplit_once(char::is_whitespace) {
        Some((rest, last)) => (rest.trim_end(), last),
        None => ("", text),
    }
}

// DNS 名称大小写不敏感
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
