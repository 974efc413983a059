//! Chart references and release name derivation

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, Result};

/// Helm rejects release names longer than this
pub const MAX_RELEASE_NAME_LEN: usize = 53;

static RELEASE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid regex")
});

static ARCHIVE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-v?\d+\.\d+\.\d+[-+.0-9A-Za-z]*$").expect("valid regex"));

/// A chart URI together with the release name derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    /// URI exactly as given: `oci://...`, `repo/chart`, a bare name, or a local path
    pub uri: String,
    /// Release name: the last path segment of the URI
    pub name: String,
}

impl ChartRef {
    /// Parse a chart URI
    ///
    /// The name is the last path segment after dropping an `oci://` scheme and
    /// trailing slashes. OCI tags/digests are dropped, and so are the `.tgz`
    /// suffix and version of a packaged archive.
    pub fn parse(uri: &str) -> Result<Self> {
        let invalid = |reason: &str| CoreError::InvalidChartUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = uri.trim();
        if trimmed.is_empty() {
            return Err(invalid("chart URI is empty"));
        }

        let is_oci = trimmed.starts_with("oci://");
        let path = trimmed.trim_start_matches("oci://").trim_end_matches('/');
        let mut name = path.rsplit('/').next().unwrap_or_default();

        if is_oci {
            name = name.split(['@', ':']).next().unwrap_or_default();
        }

        let name = match name.strip_suffix(".tgz") {
            Some(stem) => ARCHIVE_VERSION.replace(stem, "").into_owned(),
            None => name.to_string(),
        };

        if name.is_empty() || name == "." || name == ".." {
            return Err(invalid("no chart name in URI"));
        }
        if name.len() > MAX_RELEASE_NAME_LEN {
            return Err(invalid("chart name is longer than 53 characters"));
        }
        if !RELEASE_NAME.is_match(&name) {
            return Err(invalid(
                "chart name must be lowercase alphanumerics, '-' or '.'",
            ));
        }

        Ok(Self {
            uri: trimmed.to_string(),
            name,
        })
    }

    pub fn is_oci(&self) -> bool {
        self.uri.starts_with("oci://")
    }
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(uri: &str) -> String {
        ChartRef::parse(uri).unwrap().name
    }

    #[test]
    fn test_oci_uri() {
        assert_eq!(name("oci://ghcr.io/org/charts/my-app"), "my-app");
        assert!(ChartRef::parse("oci://ghcr.io/org/charts/my-app").unwrap().is_oci());
    }

    #[test]
    fn test_oci_tag_and_digest() {
        assert_eq!(name("oci://registry-1.docker.io/bitnamicharts/nginx:18.1.0"), "nginx");
        assert_eq!(name("oci://ghcr.io/org/app@sha256:abc123"), "app");
    }

    #[test]
    fn test_repo_and_bare_names() {
        assert_eq!(name("bitnami/nginx"), "nginx");
        assert_eq!(name("ingress-nginx"), "ingress-nginx");
        assert!(!ChartRef::parse("bitnami/nginx").unwrap().is_oci());
    }

    #[test]
    fn test_local_paths() {
        assert_eq!(name("./charts/web/"), "web");
        assert_eq!(name("/srv/charts/api"), "api");
        assert_eq!(name("./dist/web-1.2.3.tgz"), "web");
        assert_eq!(name("my-chart-v0.4.0-rc.1.tgz"), "my-chart");
    }

    #[test]
    fn test_uri_is_kept_verbatim() {
        let chart = ChartRef::parse("  oci://ghcr.io/org/app ").unwrap();
        assert_eq!(chart.uri, "oci://ghcr.io/org/app");
        assert_eq!(chart.to_string(), "oci://ghcr.io/org/app");
    }

    #[test]
    fn test_invalid_uris() {
        for uri in ["", "   ", "oci://", "/", "./", "charts/..", "Bitnami/NGINX", "a/b_c"] {
            assert!(
                matches!(ChartRef::parse(uri), Err(CoreError::InvalidChartUri { .. })),
                "expected {uri:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_name_too_long() {
        let uri = format!("repo/{}", "a".repeat(54));
        assert!(ChartRef::parse(&uri).is_err());
        let uri = format!("repo/{}", "a".repeat(53));
        assert!(ChartRef::parse(&uri).is_ok());
    }
}
