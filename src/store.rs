//! Scheme persistence
//!
//! Schemes live in two places: the primary interfaces(5) file and a
//! directory of per-scheme override files layered on top of it. A store
//! is bound to one such pair of paths at construction; independent
//! stores never interfere.

use crate::config::SchemectlConfig;
use crate::error::{SchemeError, SchemeResult};
use crate::interfaces;
use crate::scheme::Scheme;
use crate::validation;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use tracing::{debug, info};

/// Default primary interfaces file
const INTERFACES_FILE: &str = "/etc/network/interfaces";
/// Default override directory
const INTERFACES_DIR: &str = "/etc/network/interfaces.d";

/// Store for saved schemes backed by an interfaces file and an
/// interfaces.d-style override directory.
pub struct SchemeStore {
    interfaces: PathBuf,
    interfaces_d: PathBuf,
}

impl SchemeStore {
    /// Store bound to the given primary file and override directory.
    pub fn new(interfaces: impl Into<PathBuf>, interfaces_d: impl Into<PathBuf>) -> Self {
        Self {
            interfaces: interfaces.into(),
            interfaces_d: interfaces_d.into(),
        }
    }

    /// Store bound to the paths from a configuration.
    pub fn from_config(config: &SchemectlConfig) -> Self {
        Self::new(
            config.paths.interfaces.clone(),
            config.paths.interfaces_d.clone(),
        )
    }

    /// All saved schemes: primary-file blocks first, then one batch per
    /// override-directory file in directory-listing order.
    ///
    /// The primary file is created empty if it does not exist yet; a
    /// missing override directory is an environment error.
    pub fn all(&self) -> SchemeResult<Vec<Scheme>> {
        self.ensure_primary_exists()?;

        let mut schemes = Vec::new();
        let text = fs::read_to_string(&self.interfaces)?;
        schemes.extend(interfaces::extract_schemes(&text));

        for entry in fs::read_dir(&self.interfaces_d)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            schemes.extend(interfaces::extract_schemes(&text));
        }

        debug!(
            "Loaded {} schemes from {} and {}",
            schemes.len(),
            self.interfaces.display(),
            self.interfaces_d.display()
        );
        Ok(schemes)
    }

    /// First saved scheme matching the interface and name, if any.
    pub fn find(&self, interface: &str, name: &str) -> SchemeResult<Option<Scheme>> {
        Ok(self
            .all()?
            .into_iter()
            .find(|s| s.interface == interface && s.name == name))
    }

    /// Persist a scheme as an override-directory file.
    ///
    /// Fails with [`SchemeError::AlreadyExists`] when a scheme with the
    /// same interface and name is already saved and overwriting was not
    /// allowed; with it allowed, the existing scheme is deleted first.
    pub fn save(&self, scheme: &Scheme, allow_overwrite: bool) -> SchemeResult<()> {
        validation::validate_interface_name(&scheme.interface)?;
        validation::validate_scheme_name(&scheme.name)?;

        let _lock = self.lock_mutations()?;

        if self.find(&scheme.interface, &scheme.name)?.is_some() {
            if !allow_overwrite {
                return Err(SchemeError::AlreadyExists {
                    interface: scheme.interface.clone(),
                    name: scheme.name.clone(),
                });
            }
            self.remove_unlocked(&scheme.interface, &scheme.name)?;
        }

        let path = self.override_path(&scheme.interface, &scheme.name);
        fs::write(&path, scheme.to_string())?;
        info!("Saved scheme {} to {}", scheme.iface(), path.display());
        Ok(())
    }

    /// Remove a scheme from the primary file and the override directory.
    pub fn delete(&self, interface: &str, name: &str) -> SchemeResult<()> {
        validation::validate_interface_name(interface)?;
        validation::validate_scheme_name(name)?;

        let _lock = self.lock_mutations()?;
        self.remove_unlocked(interface, name)
    }

    fn remove_unlocked(&self, interface: &str, name: &str) -> SchemeResult<()> {
        self.ensure_primary_exists()?;

        // Drop the block's lines from the header up to (not including)
        // the blank line or EOF that ends it; all other bytes are kept
        // as they were.
        let header = format!("iface {}-{} inet ", interface, name);
        let content = fs::read_to_string(&self.interfaces)?;
        let mut kept = String::with_capacity(content.len());
        let mut skip = false;
        for line in content.split_inclusive('\n') {
            if line.trim().is_empty() {
                skip = false;
            } else if line.trim_start().starts_with(&header) {
                skip = true;
            }
            if !skip {
                kept.push_str(line);
            }
        }

        if kept.len() != content.len() {
            // Replace atomically so a crash cannot truncate the file
            let tmp = self.interfaces.with_extension("tmp");
            fs::write(&tmp, &kept)?;
            fs::rename(&tmp, &self.interfaces)?;
            info!("Removed scheme {}-{} from {}", interface, name, self.interfaces.display());
        }

        let path = self.override_path(interface, name);
        if path.exists() {
            fs::remove_file(&path)?;
            info!("Removed scheme file {}", path.display());
        }
        Ok(())
    }

    fn ensure_primary_exists(&self) -> SchemeResult<()> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.interfaces)?;
        Ok(())
    }

    /// Mutations serialize on an exclusive lock over a sidecar file. A
    /// sidecar is used because deletion replaces the primary file by
    /// rename, which would strand a lock taken on the primary itself.
    fn lock_mutations(&self) -> SchemeResult<File> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(self.interfaces.with_extension("lock"))?;
        file.lock_exclusive()?;
        Ok(file)
    }

    fn override_path(&self, interface: &str, name: &str) -> PathBuf {
        self.interfaces_d.join(format!("{}-{}", interface, name))
    }
}

impl Default for SchemeStore {
    fn default() -> Self {
        Self::new(INTERFACES_FILE, INTERFACES_DIR)
    }
}
