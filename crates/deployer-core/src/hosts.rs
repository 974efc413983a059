//! Hosts file patching

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default system hosts file
pub const HOSTS_PATH: &str = "/etc/hosts";

/// Result of [`HostsFile::ensure_entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostsPatch {
    /// Some line already maps the hostname
    AlreadyPresent,
    /// The entry was appended
    Added { entry: String },
}

/// A hosts file on disk
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
}

impl HostsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a non-comment line maps `hostname`
    pub fn contains(content: &str, hostname: &str) -> bool {
        content
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .any(|line| line.split_whitespace().skip(1).any(|h| h == hostname))
    }

    /// Append `<address> <hostname>` unless the hostname is already mapped
    pub fn ensure_entry(&self, address: &str, hostname: &str) -> Result<HostsPatch> {
        let content = std::fs::read_to_string(&self.path)?;
        if Self::contains(&content, hostname) {
            return Ok(HostsPatch::AlreadyPresent);
        }

        let entry = format!("{address} {hostname}");
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(format!("\n{entry}\n").as_bytes())?;

        Ok(HostsPatch::Added { entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts_file(content: &str) -> (tempfile::TempDir, HostsFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, content).unwrap();
        (dir, HostsFile::new(path))
    }

    #[test]
    fn test_contains_matches_hostname_tokens() {
        let content = "127.0.0.1 localhost\n127.0.0.1 local.k3d.host other\n";
        assert!(HostsFile::contains(content, "local.k3d.host"));
        assert!(HostsFile::contains(content, "other"));
        assert!(!HostsFile::contains(content, "k3d.host"));
        assert!(!HostsFile::contains(content, "127.0.0.1"));
    }

    #[test]
    fn test_contains_ignores_comments() {
        let content = "# 127.0.0.1 local.k3d.host\n127.0.0.1 localhost # local.k3d.host\n";
        assert!(!HostsFile::contains(content, "local.k3d.host"));
    }

    #[test]
    fn test_ensure_entry_appends_once() {
        let (_dir, hosts) = hosts_file("127.0.0.1 localhost\n");

        let first = hosts.ensure_entry("127.0.0.1", "dev.k3d.host").unwrap();
        assert_eq!(
            first,
            HostsPatch::Added {
                entry: "127.0.0.1 dev.k3d.host".to_string()
            }
        );

        let second = hosts.ensure_entry("127.0.0.1", "dev.k3d.host").unwrap();
        assert_eq!(second, HostsPatch::AlreadyPresent);

        let content = std::fs::read_to_string(hosts.path()).unwrap();
        assert_eq!(content, "127.0.0.1 localhost\n\n127.0.0.1 dev.k3d.host\n");
    }

    #[test]
    fn test_similar_hostname_is_not_a_match() {
        let (_dir, hosts) = hosts_file("127.0.0.1 mylocal.k3d.host\n");
        let patch = hosts.ensure_entry("127.0.0.1", "local.k3d.host").unwrap();
        assert!(matches!(patch, HostsPatch::Added { .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let hosts = HostsFile::new("/nonexistent/hosts");
        assert!(hosts.ensure_entry("127.0.0.1", "x.k3d.host").is_err());
    }
}
