//! Integration tests for the scheme store
//!
//! Each test owns a private temporary directory standing in for
//! /etc/network, with an `interfaces` file and an `interfaces.d`
//! override directory.

use schemectl::{Scheme, SchemeError, SchemeStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestLayout {
    _dir: TempDir,
    interfaces: PathBuf,
    interfaces_d: PathBuf,
}

impl TestLayout {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let interfaces = dir.path().join("interfaces");
        let interfaces_d = dir.path().join("interfaces.d");
        fs::create_dir(&interfaces_d).unwrap();
        Self {
            _dir: dir,
            interfaces,
            interfaces_d,
        }
    }

    fn store(&self) -> SchemeStore {
        SchemeStore::new(&self.interfaces, &self.interfaces_d)
    }

    fn write_primary(&self, content: &str) {
        fs::write(&self.interfaces, content).unwrap();
    }

    fn read_primary(&self) -> String {
        fs::read_to_string(&self.interfaces).unwrap()
    }
}

fn home_scheme() -> Scheme {
    let mut scheme = Scheme::new("wlan0", "home");
    scheme.add_option("wpa-ssid", "HomeNet");
    scheme.add_option("wpa-psk", "0123456789abcdef");
    scheme
}

#[test]
fn test_all_on_missing_primary_creates_it_empty() {
    let layout = TestLayout::new();
    let store = layout.store();

    let schemes = store.all().unwrap();
    assert!(schemes.is_empty());
    assert_eq!(layout.read_primary(), "");
}

#[test]
fn test_all_on_missing_override_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let store = SchemeStore::new(dir.path().join("interfaces"), dir.path().join("missing.d"));

    assert!(matches!(store.all(), Err(SchemeError::Io(_))));
}

#[test]
fn test_find_on_empty_store_is_none() {
    let layout = TestLayout::new();
    assert!(layout.store().find("wlan0", "home").unwrap().is_none());
}

#[test]
fn test_save_then_find() {
    let layout = TestLayout::new();
    let store = layout.store();
    let scheme = home_scheme();

    store.save(&scheme, false).unwrap();

    let found = store.find("wlan0", "home").unwrap().expect("scheme not found");
    assert_eq!(found, scheme);

    let file = layout.interfaces_d.join("wlan0-home");
    assert_eq!(fs::read_to_string(file).unwrap(), scheme.to_string());
}

#[test]
fn test_save_duplicate_without_overwrite_fails() {
    let layout = TestLayout::new();
    let store = layout.store();

    store.save(&home_scheme(), false).unwrap();
    let result = store.save(&home_scheme(), false);

    assert!(matches!(
        result,
        Err(SchemeError::AlreadyExists { ref interface, ref name }) if interface == "wlan0" && name == "home"
    ));
}

#[test]
fn test_save_with_overwrite_replaces_previous_scheme() {
    let layout = TestLayout::new();
    let store = layout.store();

    store.save(&home_scheme(), false).unwrap();

    let mut replacement = Scheme::new("wlan0", "home");
    replacement.add_option("wireless-essid", "HomeNet");
    replacement.add_option("wireless-channel", "auto");
    store.save(&replacement, true).unwrap();

    let all = store.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], replacement);

    let file = layout.interfaces_d.join("wlan0-home");
    assert_eq!(fs::read_to_string(file).unwrap(), replacement.to_string());
}

#[test]
fn test_duplicate_detection_spans_primary_file() {
    let layout = TestLayout::new();
    layout.write_primary("iface wlan0-home inet dhcp\n    wireless-essid HomeNet\n");
    let store = layout.store();

    let result = store.save(&home_scheme(), false);
    assert!(matches!(result, Err(SchemeError::AlreadyExists { .. })));
}

#[test]
fn test_primary_file_schemes_come_first() {
    let layout = TestLayout::new();
    layout.write_primary("iface wlan0-primary inet dhcp\n    wireless-essid First\n");
    let store = layout.store();

    let mut saved = Scheme::new("wlan1", "saved");
    saved.add_option("wireless-essid", "Second");
    store.save(&saved, false).unwrap();

    let all = store.all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "primary");
    assert_eq!(all[1].name, "saved");
}

#[test]
fn test_delete_removes_override_file() {
    let layout = TestLayout::new();
    let store = layout.store();

    store.save(&home_scheme(), false).unwrap();
    store.delete("wlan0", "home").unwrap();

    assert!(store.find("wlan0", "home").unwrap().is_none());
    assert!(!layout.interfaces_d.join("wlan0-home").exists());
}

#[test]
fn test_delete_removes_block_and_keeps_other_bytes() {
    let layout = TestLayout::new();
    layout.write_primary(concat!(
        "# interfaces(5) file used by ifup(8) and ifdown(8)\n",
        "auto lo\n",
        "\n",
        "iface wlan0-home inet dhcp\n",
        "    wireless-essid HomeNet\n",
        "    wireless-channel auto\n",
        "\n",
        "iface wlan0-office inet static\n",
        "    address 192.168.1.5\n",
    ));
    let store = layout.store();

    store.delete("wlan0", "home").unwrap();

    assert_eq!(
        layout.read_primary(),
        concat!(
            "# interfaces(5) file used by ifup(8) and ifdown(8)\n",
            "auto lo\n",
            "\n",
            "\n",
            "iface wlan0-office inet static\n",
            "    address 192.168.1.5\n",
        )
    );
}

#[test]
fn test_delete_does_not_touch_similarly_named_scheme() {
    let layout = TestLayout::new();
    layout.write_primary(concat!(
        "iface wlan0-home inet dhcp\n",
        "    wireless-essid HomeNet\n",
        "\n",
        "iface wlan0-home2 inet dhcp\n",
        "    wireless-essid OtherNet\n",
    ));
    let store = layout.store();

    store.delete("wlan0", "home").unwrap();

    let all = store.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "home2");
}

#[test]
fn test_delete_of_absent_scheme_leaves_primary_untouched() {
    let layout = TestLayout::new();
    let content = "iface wlan0-home inet dhcp\n    wireless-essid HomeNet\n";
    layout.write_primary(content);
    let store = layout.store();

    store.delete("wlan0", "nosuch").unwrap();
    assert_eq!(layout.read_primary(), content);
}

#[test]
fn test_overwrite_removes_primary_file_copy() {
    let layout = TestLayout::new();
    layout.write_primary("iface wlan0-home inet dhcp\n    wireless-essid Old\n");
    let store = layout.store();

    store.save(&home_scheme(), true).unwrap();

    assert!(!layout.read_primary().contains("iface wlan0-home"));
    let all = store.all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], home_scheme());
}

#[test]
fn test_save_rejects_invalid_tokens() {
    let layout = TestLayout::new();
    let store = layout.store();

    let traversal = Scheme::new("wlan0", "../../etc/passwd");
    assert!(matches!(
        store.save(&traversal, false),
        Err(SchemeError::InvalidParameter(_))
    ));

    let injection = Scheme::new("wlan0; reboot", "home");
    assert!(matches!(
        store.save(&injection, false),
        Err(SchemeError::InvalidParameter(_))
    ));
}

#[test]
fn test_round_trip_through_store() {
    let layout = TestLayout::new();
    let store = layout.store();

    let mut scheme = Scheme::with_type("wlan1", "office", "static");
    scheme.add_option("address", "10.0.0.5");
    scheme.add_option("netmask", "255.255.255.0");
    scheme.add_option("post-up", "echo one");
    scheme.add_option("post-up", "echo two");
    store.save(&scheme, false).unwrap();

    let found = store.find("wlan1", "office").unwrap().expect("scheme not found");
    assert_eq!(found, scheme);
    assert_eq!(
        found.options.keys().collect::<Vec<_>>(),
        scheme.options.keys().collect::<Vec<_>>()
    );
}
