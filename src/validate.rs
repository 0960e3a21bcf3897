//! Operator input validation.
//!
//! Every validator returns [`Error::Validation`] on rejection; the prompt
//! loop prints the message and asks again, while argument-supplied values
//! fail the run immediately.

use regex::Regex;
use url::Url;

use crate::error::Error;

const MACHINE_NAME_PATTERN: &str = "^[a-z0-9_]{2,32}$";

/// Machine names: site names, database identifiers, install profiles.
pub fn machine_name(input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::validation("Input can't be empty"));
    }
    let re = Regex::new(MACHINE_NAME_PATTERN).expect("hard-coded pattern");
    if re.is_match(input) {
        return Ok(());
    }
    Err(Error::validation(
        "Invalid input. Only lowercase alphanumeric characters and underscores \
         are allowed and the input must be between 2 and 32 characters",
    ))
}

/// RFC-plausible email check; the mail server has the final word.
pub fn email(input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::validation("Email can't be empty"));
    }
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("hard-coded pattern");
    if re.is_match(input) {
        return Ok(());
    }
    Err(Error::validation("Invalid email."))
}

/// Site domains must be absolute http(s) URLs with a host.
pub fn domain_url(input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::validation("Domain name can't be empty"));
    }
    let parsed = Url::parse(input).map_err(|_| Error::validation("Invalid url"))?;
    if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() {
        return Ok(());
    }
    Err(Error::validation("Invalid url"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_name_accepts_valid_names() {
        let longest = "x".repeat(32);
        for name in ["ab", "acme", "acme_site_2", "a1", longest.as_str()] {
            assert!(machine_name(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_machine_name_rejects_invalid_names() {
        let too_long = "x".repeat(33);
        for name in [
            "",
            "a",
            "Acme",
            "acme-site",
            "acme site",
            "acme!",
            too_long.as_str(),
        ] {
            assert!(machine_name(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_email_accepts_plausible_addresses() {
        for addr in ["a@b.co", "webmaster@example.com", "first.last+tag@sub.example.org"] {
            assert!(email(addr).is_ok(), "{addr} should be accepted");
        }
    }

    #[test]
    fn test_email_rejects_malformed_addresses() {
        for addr in ["", "plainaddress", "@example.com", "a@b", "a b@example.com", "a@b c.com"] {
            assert!(email(addr).is_err(), "{addr:?} should be rejected");
        }
    }

    #[test]
    fn test_domain_url_accepts_http_urls() {
        for domain in [
            "http://acme.localhost",
            "https://acme-prod.example.net",
            "http://acme.example.net:8080",
        ] {
            assert!(domain_url(domain).is_ok(), "{domain} should be accepted");
        }
    }

    #[test]
    fn test_domain_url_rejects_other_input() {
        for domain in ["", "acme.localhost", "ftp://acme.example.net", "http://"] {
            assert!(domain_url(domain).is_err(), "{domain:?} should be rejected");
        }
    }
}
