//! Scheme model
//!
//! A scheme is one saved configuration for connecting a wireless
//! interface under a logical name, as persisted in the interfaces(5)
//! file. This module owns the in-memory representation and the render
//! direction of the file format; parsing lives in [`crate::interfaces`].

use crate::error::SchemeResult;
use crate::security::{self, DiscoveredNetwork, PskDeriver};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered option mapping.
///
/// Key order and per-key value order are part of the file format:
/// repeated keys (e.g. several `post-up` lines) accumulate values in
/// encounter order.
pub type SchemeOptions = IndexMap<String, Vec<String>>;

/// Scheme type used when none is given.
pub const DEFAULT_SCHEME_TYPE: &str = "dhcp";

/// A saved connection scheme for a wireless interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    /// Physical interface name (e.g. `wlan0`)
    pub interface: String,
    /// Logical scheme name, unique per interface
    pub name: String,
    /// Address configuration method (`dhcp`, `static`, ...)
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Scheme options in file order
    #[serde(default)]
    pub options: SchemeOptions,
}

impl Scheme {
    /// Create a dhcp scheme with no options.
    pub fn new(interface: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_type(interface, name, DEFAULT_SCHEME_TYPE)
    }

    /// Create a scheme with an explicit type.
    pub fn with_type(
        interface: impl Into<String>,
        name: impl Into<String>,
        scheme_type: impl Into<String>,
    ) -> Self {
        Self {
            interface: interface.into(),
            name: name.into(),
            scheme_type: scheme_type.into(),
            options: SchemeOptions::new(),
        }
    }

    /// Build a dhcp scheme for a discovered network, deriving the option
    /// mapping from its encryption settings.
    pub fn for_network(
        interface: impl Into<String>,
        name: impl Into<String>,
        network: &DiscoveredNetwork,
        passphrase: Option<&str>,
        deriver: &dyn PskDeriver,
    ) -> SchemeResult<Self> {
        let mut scheme = Self::new(interface, name);
        scheme.options = security::derive_options(network, passphrase, deriver)?;
        Ok(scheme)
    }

    /// Append a value to an option key, creating the key if needed.
    pub fn add_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.entry(key.into()).or_default().push(value.into());
    }

    /// The device name ifup knows this scheme by, `<interface>-<name>`.
    pub fn iface(&self) -> String {
        format!("{}-{}", self.interface, self.name)
    }

    /// Whether activation output must be parsed for a bound address.
    pub fn is_dhcp(&self) -> bool {
        self.scheme_type == DEFAULT_SCHEME_TYPE
    }

    /// Argument list for bringing this scheme up.
    ///
    /// The mapping argument `<interface>=<interface>-<name>` comes first,
    /// then one `-o key=value` pair per option value in file order.
    pub fn as_args(&self) -> Vec<String> {
        let mut args = vec![format!("{}={}", self.interface, self.iface())];
        for (key, values) in &self.options {
            for value in values {
                args.push("-o".to_string());
                args.push(format!("{}={}", key, value));
            }
        }
        args
    }
}

impl fmt::Display for Scheme {
    /// Renders the scheme as it appears in the interfaces file: the
    /// `iface` header, one 4-space-indented line per option value with
    /// multi-valued keys repeated, and a trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iface {}-{} inet {}", self.interface, self.name, self.scheme_type)?;
        for (key, values) in &self.options {
            for value in values {
                write!(f, "\n    {} {}", key, value)?;
            }
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_header_only() {
        let scheme = Scheme::new("wlan0", "home");
        assert_eq!(scheme.to_string(), "iface wlan0-home inet dhcp\n");
    }

    #[test]
    fn test_render_with_options() {
        let mut scheme = Scheme::new("wlan0", "home");
        scheme.add_option("wireless-essid", "HomeNet");
        scheme.add_option("wireless-channel", "auto");

        assert_eq!(
            scheme.to_string(),
            "iface wlan0-home inet dhcp\n    wireless-essid HomeNet\n    wireless-channel auto\n"
        );
    }

    #[test]
    fn test_render_repeats_multi_valued_keys() {
        let mut scheme = Scheme::with_type("wlan0", "office", "static");
        scheme.add_option("address", "192.168.1.5");
        scheme.add_option("post-up", "echo one");
        scheme.add_option("post-up", "echo two");

        assert_eq!(
            scheme.to_string(),
            "iface wlan0-office inet static\n    address 192.168.1.5\n    post-up echo one\n    post-up echo two\n"
        );
    }

    #[test]
    fn test_iface_device_name() {
        let scheme = Scheme::new("wlan1", "cafe");
        assert_eq!(scheme.iface(), "wlan1-cafe");
    }

    #[test]
    fn test_as_args_order() {
        let mut scheme = Scheme::new("wlan0", "home");
        scheme.add_option("wpa-ssid", "HomeNet");
        scheme.add_option("wpa-psk", "secret");
        scheme.add_option("post-up", "echo one");
        scheme.add_option("post-up", "echo two");

        assert_eq!(
            scheme.as_args(),
            vec![
                "wlan0=wlan0-home",
                "-o", "wpa-ssid=HomeNet",
                "-o", "wpa-psk=secret",
                "-o", "post-up=echo one",
                "-o", "post-up=echo two",
            ]
        );
    }
}
