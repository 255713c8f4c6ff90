//! schemectl - Wireless Scheme Management Library
//!
//! Synchronous library for managing saved wireless connection schemes
//! on Debian-style ifupdown systems:
//! - interfaces(5) parsing and rendering
//! - Scheme persistence (primary file plus interfaces.d overrides)
//! - Option derivation for open, WPA and WEP networks
//! - Connect/disconnect lifecycle via ifup/ifdown
//!
//! Process execution and passphrase-to-PSK derivation sit behind the
//! [`CommandRunner`] and [`PskDeriver`] seams so embedders can replace
//! them.

pub mod config;
pub mod connection;
pub mod error;
pub mod interfaces;
pub mod process;
pub mod scheme;
pub mod security;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::{CommandPaths, ConfigPaths, SchemectlConfig};
pub use connection::{Connection, ConnectionDriver};
pub use error::{SchemeError, SchemeResult};
pub use interfaces::{extract_schemes, SchemeIter};
pub use process::{CommandRunner, ProcessOutput, SystemRunner};
pub use scheme::{Scheme, SchemeOptions, DEFAULT_SCHEME_TYPE};
pub use security::{derive_options, DiscoveredNetwork, Pbkdf2Deriver, PskDeriver};
pub use store::SchemeStore;
