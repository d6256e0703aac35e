//! Classification of decoded payloads.
//!
//! Link detection follows the usual "web URL" shape: an optional
//! http/https/rtsp scheme, optional userinfo, a domain with an alphabetic
//! top-level label or a dotted-quad IPv4 host, an optional port, and an
//! optional path, query or fragment. The whole string must match.

use std::net::Ipv4Addr;

use url::Url;

use crate::consts::WEB_URL_SCHEMES;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    Url(Url),
    Text,
}

impl PayloadKind {
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Url(_) => "link",
            Self::Text => "text",
        }
    }
}

pub fn classify(text: &str) -> PayloadKind {
    match openable_url(text) {
        Some(url) => PayloadKind::Url(url),
        None => PayloadKind::Text,
    }
}

pub fn is_url(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }

    let scheme = split_scheme(text);
    let rest = match scheme {
        Some((scheme, rest)) => {
            if !WEB_URL_SCHEMES
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme))
            {
                return false;
            }
            rest
        }
        None => text,
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => {
            // userinfo only exists inside a `scheme://` authority
            if scheme.is_none() || userinfo.is_empty() {
                return false;
            }
            host_port
        }
        None => authority,
    };

    let host = match host_port.rsplit_once(':') {
        Some((host, port)) => {
            if !valid_port(port) {
                return false;
            }
            host
        }
        None => host_port,
    };

    valid_host(host)
}

/// The payload as a URL a browser can open, adding `http://` when the
/// scheme is missing.
pub fn openable_url(text: &str) -> Option<Url> {
    if !is_url(text) {
        return None;
    }
    let candidate = if split_scheme(text).is_some() {
        text.to_string()
    } else {
        format!("http://{text}")
    };
    Url::parse(&candidate).ok()
}

fn split_scheme(text: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = text.split_once("://")?;
    let valid = !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn valid_port(port: &str) -> bool {
    !port.is_empty()
        && port.len() <= 5
        && port.chars().all(|c| c.is_ascii_digit())
        && matches!(port.parse::<u32>(), Ok(1..=65535))
}

fn valid_host(host: &str) -> bool {
    if host.is_empty() {
        return false;
    }
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host.parse::<Ipv4Addr>().is_ok();
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| valid_label(l)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    let punycode = tld.len() > 4
        && tld
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--"));
    punycode || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}

fn valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || !c.is_ascii())
}
