//! Locator construction.
//!
//! [`LocatorFactory`] is the seam callers depend on; [`DefaultLocatorFactory`]
//! is the stateless implementation driven by [`DavkitConfig`]. Every call is
//! independent, so one factory can be shared freely across threads.

use url::Url;

use crate::config::{DavkitConfig, ValidationMode};
use crate::error::LocatorError;
use crate::locator::{check_label, Locator};
use crate::stable::StableUrlPolicy;

/// Builds locators from string-form URLs.
pub trait LocatorFactory: Send + Sync {
    /// Locator for the current resource at `resource_url`, resolved the
    /// standard way. Version-unaware clients use this kind exclusively.
    fn new_locator(&self, resource_url: &str) -> Result<Locator, LocatorError>;

    /// Locator for the version tagged `label` in the history of the
    /// version-controlled resource at `request_url`.
    ///
    /// `request_url` must not be a stable URL.
    fn new_labelled_locator(&self, request_url: &str, label: &str)
        -> Result<Locator, LocatorError>;

    /// Locator bound to a stable URL previously handed out by the server.
    /// The result never carries a label.
    fn new_stable_locator(&self, resource_url: &str) -> Result<Locator, LocatorError>;
}

/// Default [`LocatorFactory`]. Holds only immutable settings.
#[derive(Debug, Clone)]
pub struct DefaultLocatorFactory {
    mode: ValidationMode,
    stable_policy: StableUrlPolicy,
    allowed_schemes: Vec<String>,
}

impl DefaultLocatorFactory {
    pub fn new(mode: ValidationMode, stable_policy: StableUrlPolicy) -> Self {
        Self {
            mode,
            stable_policy,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }

    pub fn from_config(cfg: &DavkitConfig) -> Self {
        Self {
            mode: cfg.validation,
            stable_policy: StableUrlPolicy::new(cfg.stable_markers.iter().cloned()),
            allowed_schemes: cfg
                .allowed_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_schemes = schemes
            .into_iter()
            .map(|s| s.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    fn parse_url(&self, raw: &str) -> Result<Url, LocatorError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocatorError::EmptyUrl);
        }
        let url = Url::parse(trimmed).map_err(|source| LocatorError::InvalidUrl {
            url: trimmed.to_string(),
            source,
        })?;

        if self.mode == ValidationMode::Strict
            && !self.allowed_schemes.iter().any(|s| s == url.scheme())
        {
            return Err(LocatorError::UnsupportedScheme {
                url: trimmed.to_string(),
                scheme: url.scheme().to_string(),
            });
        }
        Ok(url)
    }
}

impl Default for DefaultLocatorFactory {
    fn default() -> Self {
        Self::from_config(&DavkitConfig::default())
    }
}

impl LocatorFactory for DefaultLocatorFactory {
    fn new_locator(&self, resource_url: &str) -> Result<Locator, LocatorError> {
        let url = self.parse_url(resource_url)?;
        tracing::debug!(url = %url, "unversioned locator");
        Ok(Locator::unversioned(url))
    }

    fn new_labelled_locator(
        &self,
        request_url: &str,
        label: &str,
    ) -> Result<Locator, LocatorError> {
        let url = self.parse_url(request_url)?;
        let label = check_label(label)?;

        if self.stable_policy.is_stable(&url) {
            match self.mode {
                ValidationMode::Strict => {
                    tracing::warn!(url = %url, label = %label, "rejected stable URL with label");
                    return Err(LocatorError::StableUrlWithLabel {
                        url: url.to_string(),
                    });
                }
                ValidationMode::Lenient => {
                    tracing::debug!(url = %url, "stable URL passed with a label; not checked in lenient mode");
                }
            }
        }

        tracing::debug!(url = %url, label = %label, "labelled locator");
        Ok(Locator::labelled(url, label))
    }

    fn new_stable_locator(&self, resource_url: &str) -> Result<Locator, LocatorError> {
        let url = self.parse_url(resource_url)?;
        if !self.stable_policy.is_stable(&url) {
            // The server is the authority on what it issued; only note it.
            tracing::debug!(url = %url, "stable locator for a URL without a stable marker");
        }
        Ok(Locator::stable(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::LocatorKind;

    fn strict() -> DefaultLocatorFactory {
        DefaultLocatorFactory::default()
    }

    fn lenient() -> DefaultLocatorFactory {
        DefaultLocatorFactory::new(ValidationMode::Lenient, StableUrlPolicy::default())
    }

    #[test]
    fn new_locator_unversioned() {
        let loc = strict().new_locator("http://x/res").unwrap();
        assert_eq!(loc.resource_url().as_str(), "http://x/res");
        assert_eq!(loc.kind(), &LocatorKind::Unversioned);
        assert_eq!(loc.label(), None);
    }

    #[test]
    fn new_locator_normalises_url() {
        let a = strict().new_locator("HTTP://Example.COM:80/res").unwrap();
        let b = strict().new_locator("  http://example.com/res ").unwrap();
        assert_eq!(a.resource_url().as_str(), "http://example.com/res");
        assert_eq!(a, b);
    }

    #[test]
    fn new_locator_rejects_empty_and_garbage() {
        assert_eq!(strict().new_locator(""), Err(LocatorError::EmptyUrl));
        assert_eq!(strict().new_locator("   "), Err(LocatorError::EmptyUrl));
        assert!(matches!(
            strict().new_locator("not a url"),
            Err(LocatorError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn strict_rejects_unlisted_scheme_lenient_accepts() {
        assert!(matches!(
            strict().new_locator("ftp://x/res"),
            Err(LocatorError::UnsupportedScheme { scheme, .. }) if scheme == "ftp"
        ));
        let loc = lenient().new_locator("ftp://x/res").unwrap();
        assert_eq!(loc.resource_url().scheme(), "ftp");
    }

    #[test]
    fn custom_allowed_schemes() {
        let f = strict().with_allowed_schemes(["HTTPS"]);
        assert!(f.new_locator("https://x/res").is_ok());
        assert!(matches!(
            f.new_locator("http://x/res"),
            Err(LocatorError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn labelled_records_url_and_label() {
        let loc = strict().new_labelled_locator("http://x/res", " v1 ").unwrap();
        assert_eq!(loc.resource_url().as_str(), "http://x/res");
        assert_eq!(loc.label(), Some("v1"));
        assert!(!loc.is_stable());
    }

    #[test]
    fn labelled_rejects_bad_labels() {
        assert_eq!(
            strict().new_labelled_locator("http://x/res", "  "),
            Err(LocatorError::EmptyLabel)
        );
        assert!(matches!(
            strict().new_labelled_locator("http://x/res", "v\n1"),
            Err(LocatorError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn labelled_with_stable_url_strict_vs_lenient() {
        assert_eq!(
            strict().new_labelled_locator("http://x/stable/123", "v1"),
            Err(LocatorError::StableUrlWithLabel {
                url: "http://x/stable/123".to_string()
            })
        );
        let loc = lenient()
            .new_labelled_locator("http://x/stable/123", "v1")
            .unwrap();
        assert_eq!(loc.label(), Some("v1"));
    }

    #[test]
    fn strict_rejects_percent_encoded_stable_marker() {
        assert!(matches!(
            strict().new_labelled_locator("http://x/%73table/123", "v1"),
            Err(LocatorError::StableUrlWithLabel { .. })
        ));
        assert!(matches!(
            strict().new_labelled_locator("https://svn.example.com/repo/%21svn/ver/42/a.drl", "v1"),
            Err(LocatorError::StableUrlWithLabel { .. })
        ));
    }

    #[test]
    fn stable_locator_has_no_label() {
        let loc = strict().new_stable_locator("http://x/stable/123").unwrap();
        assert!(loc.is_stable());
        assert_eq!(loc.label(), None);
    }

    #[test]
    fn stable_locator_accepts_url_without_marker() {
        let loc = strict().new_stable_locator("http://x/vh/77").unwrap();
        assert!(loc.is_stable());
    }

    #[test]
    fn from_config_uses_markers_and_mode() {
        let cfg = DavkitConfig {
            validation: ValidationMode::Strict,
            stable_markers: vec!["vh".to_string()],
            ..DavkitConfig::default()
        };
        let f = DefaultLocatorFactory::from_config(&cfg);
        assert!(matches!(
            f.new_labelled_locator("http://x/vh/1", "v1"),
            Err(LocatorError::StableUrlWithLabel { .. })
        ));
        assert!(f.new_labelled_locator("http://x/stable/1", "v1").is_ok());
    }

    #[test]
    fn usable_as_trait_object() {
        let f: Box<dyn LocatorFactory> = Box::new(strict());
        assert!(f.new_locator("https://x/res").is_ok());
    }
}
