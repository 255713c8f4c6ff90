//! interfaces(5) scheme extraction
//!
//! Scans Debian-style `/etc/network/interfaces` text for managed scheme
//! blocks: an `iface <interface>-<name> inet <type>` header followed by
//! indented option lines. Everything else (comments, blank lines, `auto`
//! and `source` directives, schemes without a logical name) is passed
//! over without error so the file can keep carrying configuration this
//! library does not manage.

use crate::scheme::{Scheme, SchemeOptions};
use std::iter::Peekable;
use std::str::Lines;

/// Extract all managed schemes from interfaces-file text.
///
/// The returned iterator is lazy and single-pass; clone it to restart
/// from the beginning.
pub fn extract_schemes(text: &str) -> SchemeIter<'_> {
    SchemeIter {
        lines: text.lines().peekable(),
    }
}

/// Iterator over the schemes found in one piece of interfaces-file text.
#[derive(Debug, Clone)]
pub struct SchemeIter<'a> {
    lines: Peekable<Lines<'a>>,
}

impl<'a> Iterator for SchemeIter<'a> {
    type Item = Scheme;

    fn next(&mut self) -> Option<Scheme> {
        while let Some(line) = self.lines.next() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((interface, name, scheme_type)) = match_header(line) else {
                continue;
            };
            // A header without a -<name> suffix is a plain interface
            // definition, not a managed scheme. Its indented lines fall
            // through the loop above and are ignored.
            let Some(name) = name else {
                continue;
            };

            let mut options = SchemeOptions::new();
            while let Some(next) = self.lines.peek() {
                if !is_option_line(next) {
                    break;
                }
                if let Some((key, value)) = split_option(next) {
                    options.entry(key).or_default().push(value);
                }
                self.lines.next();
            }

            let mut scheme = Scheme::with_type(interface, name, scheme_type);
            scheme.options = options;
            return Some(scheme);
        }
        None
    }
}

/// Whether a token names a wireless adapter: `wlan` plus at most one
/// trailing digit.
pub fn is_wireless_interface(token: &str) -> bool {
    match token.strip_prefix("wlan") {
        Some(rest) => rest.is_empty() || (rest.len() == 1 && rest.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Match `iface <interface>[-<name>] inet <type>` at the start of a
/// non-indented line. Tokens after the type are tolerated and ignored.
fn match_header(line: &str) -> Option<(&str, Option<&str>, &str)> {
    if line.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let mut tokens = line.split_whitespace();
    if tokens.next()? != "iface" {
        return None;
    }
    let device = tokens.next()?;
    if tokens.next()? != "inet" {
        return None;
    }
    let scheme_type = tokens.next()?;
    if !is_word(scheme_type) {
        return None;
    }

    let (interface, name) = match device.split_once('-') {
        Some((interface, name)) => (interface, Some(name)),
        None => (device, None),
    };
    if !is_wireless_interface(interface) {
        return None;
    }
    if let Some(name) = name {
        if !is_word(name) {
            return None;
        }
    }

    Some((interface, name, scheme_type))
}

/// An option line is indented and not blank.
fn is_option_line(line: &str) -> bool {
    line.starts_with(|c: char| c.is_whitespace()) && !line.trim().is_empty()
}

/// Split one option line into key and value: trim, collapse interior
/// whitespace runs of two or more characters to a single space, split on
/// the first remaining space. Lines with no value part are dropped.
fn split_option(line: &str) -> Option<(String, String)> {
    let collapsed = collapse_whitespace(line.trim());
    let (key, value) = collapsed.split_once(' ')?;
    Some((key.to_string(), value.to_string()))
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run = 0usize;
    let mut last_ws = ' ';
    for c in s.chars() {
        if c.is_whitespace() {
            run += 1;
            last_ws = c;
        } else {
            if run == 1 {
                out.push(last_ws);
            } else if run > 1 {
                out.push(' ');
            }
            run = 0;
            out.push(c);
        }
    }
    out
}
