//! Input validation for scheme identities
//!
//! Interface and scheme names end up in file names, in the interfaces
//! file, and on external command lines, so they are validated before any
//! of that happens.

use crate::error::{SchemeError, SchemeResult};

/// Maximum length for interface names (Linux kernel limit is 15)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Maximum length for scheme names
const MAX_SCHEME_NAME_LEN: usize = 64;

/// Validate a physical interface name
///
/// Interface names must be alphanumeric with optional underscores and no
/// longer than 15 characters. Dashes are rejected: the dash is the
/// interface/scheme separator in device names like `wlan0-home`.
pub fn validate_interface_name(name: &str) -> SchemeResult<()> {
    if name.is_empty() {
        return Err(SchemeError::InvalidParameter(
            "Interface name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(SchemeError::InvalidParameter(
            format!("Interface name too long (max {} characters)", MAX_INTERFACE_NAME_LEN)
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(SchemeError::InvalidParameter(
                format!("Invalid interface name '{}': contains invalid character '{}'", name, c)
            ));
        }
    }

    Ok(())
}

/// Validate a logical scheme name
///
/// Scheme names must be word characters only (alphanumeric plus
/// underscore) so they survive the `iface <interface>-<name> inet`
/// header round trip.
pub fn validate_scheme_name(name: &str) -> SchemeResult<()> {
    if name.is_empty() {
        return Err(SchemeError::InvalidParameter(
            "Scheme name cannot be empty".to_string()
        ));
    }

    if name.len() > MAX_SCHEME_NAME_LEN {
        return Err(SchemeError::InvalidParameter(
            format!("Scheme name too long (max {} characters)", MAX_SCHEME_NAME_LEN)
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(SchemeError::InvalidParameter(
                format!("Invalid scheme name '{}': contains invalid character '{}'", name, c)
            ));
        }
    }

    Ok(())
}
