//! Module related to email addresses.
//!
//! This module splits raw address-list header values into discrete
//! address tokens and extracts the display name and bare email from a
//! single token.

use regex::Regex;

fn push_trimmed(addrs: &mut Vec<String>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        addrs.push(token.to_owned());
    }
}

/// Splits an address-list header value into trimmed address tokens.
///
/// `,` and `;` act as separators only outside double quotes and angle
/// brackets, so `"Doe, John" <john@example.com>` stays a single token.
/// Empty tokens are discarded.
pub fn split_address_list<S: AsRef<str>>(list: S) -> Vec<String> {
    let mut addrs = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_brackets = false;

    for c in list.as_ref().chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            '<' => in_brackets = true,
            '>' => in_brackets = false,
            ',' | ';' if !in_quotes && !in_brackets => {
                push_trimmed(&mut addrs, &current);
                current.clear();
                continue;
            }
            _ => (),
        }
        current.push(c);
    }
    push_trimmed(&mut addrs, &current);

    addrs
}

/// Extracts the display name and bare email from a single address
/// token: `"name" <email>` gives (name, email), a bare address gives
/// ("", email). Anything else is returned verbatim in the email slot
/// with an empty name, so malformed input never fails.
pub fn parse_single_address(addr: &str) -> (String, String) {
    let addr = addr.trim();
    if addr.is_empty() {
        return (String::new(), String::new());
    }

    let name_with_addr = Regex::new(r#"^"?([^"<]*)"?\s*<([^>]+)>$"#).unwrap();
    if let Some(caps) = name_with_addr.captures(addr) {
        return (caps[1].trim().to_owned(), caps[2].trim().to_owned());
    }

    let bare_addr = Regex::new(r"^([^@\s]+@[^@\s]+)$").unwrap();
    if bare_addr.is_match(addr) {
        return (String::new(), addr.to_owned());
    }

    (String::new(), addr.to_owned())
}


#[cfg(test)]
mod test_parse_single_address {
    use super::parse_single_address;

    #[test]
    fn test_quoted_name_with_bracketed_addr() {
        assert_eq!(
            ("Doe, John".into(), "john@example.com".into()),
            parse_single_address(r#""Doe, John" <john@example.com>"#)
        );
    }

    #[test]
    fn test_unquoted_name_with_bracketed_addr() {
        assert_eq!(
            ("Jane".into(), "jane@example.org".into()),
            parse_single_address("Jane <jane@example.org>")
        );
    }

    #[test]
    fn test_bare_addr() {
        assert_eq!(
            ("".into(), "jane@example.org".into()),
            parse_single_address("jane@example.org")
        );
    }

    #[test]
    fn test_malformed_input_is_returned_verbatim() {
        assert_eq!(
            ("".into(), "not an address".into()),
            parse_single_address("not an address")
        );
    }
}
