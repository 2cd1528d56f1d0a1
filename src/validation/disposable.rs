use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Disposable-email providers shipped with the binary; used when no domains
/// file is configured.
const DEFAULT_DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "guerrillamail.com",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
    "throwaway.email",
    "tempmail.com",
    "dispostable.com",
    "20minutemail.com",
    "trashmail.com",
    "sharklasers.com",
    "grr.la",
];

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read disposable domains file: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Process-wide set of known disposable-email domains.
///
/// Built once at startup and shared read-only across requests; lookups are
/// case-insensitive O(1) membership tests against an immutable snapshot.
/// Reloading builds a complete new set and swaps the whole `Arc`, so
/// concurrent readers observe either the old set or the new one, never a
/// partially populated mix.
pub struct DisposableRegistry {
    domains: RwLock<Arc<HashSet<String>>>,
}

impl DisposableRegistry {
    /// Registry over the compiled-in provider list.
    pub fn with_defaults() -> Self {
        Self::from_domains(DEFAULT_DISPOSABLE_DOMAINS.iter().copied())
    }

    /// Registry over an explicit list of domains; entries are lowercased.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self {
            domains: RwLock::new(Arc::new(set)),
        }
    }

    /// Loads a registry from a domains file: one domain per line, `#` starts
    /// a comment, blank lines are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let set = read_domains_file(path.as_ref())?;
        Ok(Self {
            domains: RwLock::new(Arc::new(set)),
        })
    }

    /// Case-insensitive membership test.
    pub fn is_disposable(&self, domain: &str) -> bool {
        self.snapshot().contains(&domain.trim().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Re-reads the domains file and atomically replaces the current set.
    ///
    /// The new set is fully built before the swap; on error the existing set
    /// is left untouched. Returns the number of domains loaded.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<usize, RegistryError> {
        let set = read_domains_file(path.as_ref())?;
        let count = set.len();
        let replacement = Arc::new(set);
        match self.domains.write() {
            Ok(mut guard) => *guard = replacement,
            Err(poisoned) => *poisoned.into_inner() = replacement,
        }
        tracing::info!(domains = count, "disposable domain registry reloaded");
        Ok(count)
    }

    /// Clones the current `Arc` snapshot. A poisoned lock still holds a
    /// fully swapped set, so it is safe to recover the inner value.
    fn snapshot(&self) -> Arc<HashSet<String>> {
        match self.domains.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}

fn read_domains_file(path: &Path) -> Result<HashSet<String>, RegistryError> {
    let file = std::fs::File::open(path).map_err(|source| RegistryError::Read { source })?;
    parse_domains(BufReader::new(file))
}

/// Parses the domains file format: one domain per line, `#` comments, blank
/// lines ignored, entries lowercased.
fn parse_domains(reader: impl BufRead) -> Result<HashSet<String>, RegistryError> {
    let mut domains = HashSet::new();
    for line in reader.lines() {
        let line = line.map_err(|source| RegistryError::Read { source })?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        domains.insert(entry.to_ascii_lowercase());
    }
    Ok(domains)
}
