//! Network security settings
//!
//! Maps a discovered network's encryption settings (plus a passphrase
//! where one is needed) onto the scheme options ifup's wireless hooks
//! understand.

use crate::error::{SchemeError, SchemeResult};
use crate::scheme::SchemeOptions;
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha1::Sha1;

/// WEP pass key lengths in bytes depend on type of key and key length:
///
/// ```text
///         64bit   128bit   152bit   256bit
///   hex     10      26       32       58
///   ASCII    5      13       16       29
/// ```
///
/// ASCII keys need an `s:` prefix in the interfaces file for the Linux
/// wireless tools to pick them up properly.
const WEP_ASCII_KEY_LENGTHS: [usize; 4] = [5, 13, 16, 29];

/// Length of a WPA pre-shared key in hex characters
const WPA_PSK_LEN: usize = 64;

/// PBKDF2 iteration count of the 802.11i passphrase-to-PSK mapping
const WPA_PSK_ROUNDS: u32 = 4096;

/// A network as reported by the scan subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredNetwork {
    pub ssid: String,
    pub encrypted: bool,
    /// Encryption family (`wpa`, `wpa2`, `wep`, ...); only meaningful
    /// when `encrypted` is set
    pub encryption_type: Option<String>,
}

/// Passphrase-to-PSK transform consumed by option derivation.
pub trait PskDeriver {
    /// Derive a 64-character hex pre-shared key from a passphrase and
    /// the network name.
    fn derive_psk(&self, passphrase: &str, ssid: &str) -> String;
}

/// The standard 802.11i mapping: PBKDF2-HMAC-SHA1 over (passphrase,
/// ssid) with 4096 iterations and a 32-byte output, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2Deriver;

impl PskDeriver for Pbkdf2Deriver {
    fn derive_psk(&self, passphrase: &str, ssid: &str) -> String {
        let mut psk = [0u8; 32];
        pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), ssid.as_bytes(), WPA_PSK_ROUNDS, &mut psk);
        psk.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Derive the scheme options for a discovered network.
///
/// Open networks need no passphrase. WPA-family networks take the
/// passphrase as-is when it is already a 64-character PSK and run it
/// through the deriver otherwise. WEP secrets whose length matches an
/// ASCII key length get the `s:` prefix; any other length is passed
/// through and treated as hex by the wireless tools.
pub fn derive_options(
    network: &DiscoveredNetwork,
    passphrase: Option<&str>,
    deriver: &dyn PskDeriver,
) -> SchemeResult<SchemeOptions> {
    let mut options = SchemeOptions::new();

    if !network.encrypted {
        options.insert("wireless-essid".to_string(), vec![network.ssid.clone()]);
        options.insert("wireless-channel".to_string(), vec!["auto".to_string()]);
        return Ok(options);
    }

    let encryption = network.encryption_type.as_deref().unwrap_or("unknown");
    if encryption.starts_with("wpa") {
        let passphrase = required_passphrase(passphrase, encryption)?;
        let psk = if passphrase.len() == WPA_PSK_LEN {
            passphrase.to_string()
        } else {
            deriver.derive_psk(passphrase, &network.ssid)
        };
        options.insert("wpa-ssid".to_string(), vec![network.ssid.clone()]);
        options.insert("wpa-psk".to_string(), vec![psk]);
        options.insert("wireless-channel".to_string(), vec!["auto".to_string()]);
    } else if encryption == "wep" {
        let passphrase = required_passphrase(passphrase, encryption)?;
        let key = if WEP_ASCII_KEY_LENGTHS.contains(&passphrase.len()) {
            format!("s:{}", passphrase)
        } else {
            passphrase.to_string()
        };
        options.insert("wireless-essid".to_string(), vec![network.ssid.clone()]);
        options.insert("wireless-key".to_string(), vec![key]);
    } else {
        return Err(SchemeError::UnsupportedEncryption(encryption.to_string()));
    }

    Ok(options)
}

fn required_passphrase<'a>(passphrase: Option<&'a str>, encryption: &str) -> SchemeResult<&'a str> {
    passphrase.ok_or_else(|| {
        SchemeError::InvalidParameter(format!("A passphrase is required for {} networks", encryption))
    })
}
