//! Recognising server-issued stable URLs.

use percent_encoding::percent_decode_str;
use url::Url;

/// Path segments that mark a URL as server-issued and stable by default.
pub const DEFAULT_STABLE_MARKERS: &[&str] = &["stable", "!svn"];

/// Decides whether a URL is a stable URL.
///
/// Servers mint stable URLs under a recognisable namespace (e.g.
/// `/repo/stable/123` or Subversion's `/repo/!svn/ver/42/file`). A URL counts
/// as stable when any of its path segments equals one of the markers,
/// compared ASCII case-insensitively after percent-decoding, so
/// `/%73table/1` matches `stable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableUrlPolicy {
    markers: Vec<String>,
}

impl StableUrlPolicy {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn is_stable(&self, url: &Url) -> bool {
        let Some(segments) = url.path_segments() else {
            return false;
        };
        segments
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy())
            .any(|s| self.markers.iter().any(|m| m.eq_ignore_ascii_case(&s)))
    }
}

impl Default for StableUrlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_STABLE_MARKERS.iter().copied())
    }
}
