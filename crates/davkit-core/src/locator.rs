//! Locator value type.
//!
//! A locator names either the current state of a resource, one labelled
//! version in the history of a version-controlled resource, or a version
//! addressed through a server-issued stable URL. Locators are immutable and
//! compare by value: kind plus the normalised URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::LocatorError;
use crate::stable::StableUrlPolicy;

/// How a [`Locator`] selects its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LocatorKind {
    /// The current resource at the URL, resolved the standard way.
    /// Version-unaware clients only ever use this kind.
    Unversioned,
    /// The version tagged `label` in the history of the version-controlled
    /// resource at the URL.
    Labelled { label: String },
    /// The version bound to a server-issued stable URL. Such resources can be
    /// deleted but never moved, and the URL is never rebound.
    Stable,
}

/// Identifier for a resource or one version of it.
///
/// Deserialized locators get the same label checks as the factory, and a
/// labelled locator is refused when its URL matches the default stable
/// markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocator")]
pub struct Locator {
    url: Url,
    #[serde(flatten)]
    kind: LocatorKind,
}

/// Unchecked wire form of a [`Locator`].
#[derive(Deserialize)]
struct RawLocator {
    url: Url,
    #[serde(flatten)]
    kind: LocatorKind,
}

impl TryFrom<RawLocator> for Locator {
    type Error = LocatorError;

    fn try_from(raw: RawLocator) -> Result<Self, Self::Error> {
        match raw.kind {
            LocatorKind::Unversioned => Ok(Locator::unversioned(raw.url)),
            LocatorKind::Stable => Ok(Locator::stable(raw.url)),
            LocatorKind::Labelled { label } => {
                let label = check_label(&label)?;
                if StableUrlPolicy::default().is_stable(&raw.url) {
                    return Err(LocatorError::StableUrlWithLabel {
                        url: raw.url.to_string(),
                    });
                }
                Ok(Locator::labelled(raw.url, label))
            }
        }
    }
}

/// Trim a version label and reject empty or control-character labels.
pub(crate) fn check_label(label: &str) -> Result<String, LocatorError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(LocatorError::EmptyLabel);
    }
    if label.chars().any(char::is_control) {
        return Err(LocatorError::InvalidLabel {
            label: label.to_string(),
        });
    }
    Ok(label.to_string())
}

impl Locator {
    pub(crate) fn unversioned(url: Url) -> Self {
        Self {
            url,
            kind: LocatorKind::Unversioned,
        }
    }

    pub(crate) fn labelled(url: Url, label: String) -> Self {
        Self {
            url,
            kind: LocatorKind::Labelled { label },
        }
    }

    pub(crate) fn stable(url: Url) -> Self {
        Self {
            url,
            kind: LocatorKind::Stable,
        }
    }

    /// The resource URL, after normalisation by the URL parser.
    pub fn resource_url(&self) -> &Url {
        &self.url
    }

    /// Version label, present only for labelled locators.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            LocatorKind::Labelled { label } => Some(label),
            LocatorKind::Unversioned | LocatorKind::Stable => None,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self.kind, LocatorKind::Stable)
    }

    /// True for labelled and stable locators.
    pub fn is_versioned(&self) -> bool {
        !matches!(self.kind, LocatorKind::Unversioned)
    }

    pub fn kind(&self) -> &LocatorKind {
        &self.kind
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LocatorKind::Unversioned => write!(f, "{}", self.url),
            LocatorKind::Labelled { label } => write!(f, "{} (label {})", self.url, label),
            LocatorKind::Stable => write!(f, "{} (stable)", self.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn accessors_per_kind() {
        let plain = Locator::unversioned(url("http://x/res"));
        assert_eq!(plain.label(), None);
        assert!(!plain.is_stable());
        assert!(!plain.is_versioned());

        let labelled = Locator::labelled(url("http://x/res"), "v1".to_string());
        assert_eq!(labelled.label(), Some("v1"));
        assert!(!labelled.is_stable());
        assert!(labelled.is_versioned());

        let stable = Locator::stable(url("http://x/stable/123"));
        assert_eq!(stable.label(), None);
        assert!(stable.is_stable());
        assert!(stable.is_versioned());
    }

    #[test]
    fn same_url_different_kind_not_equal() {
        let a = Locator::unversioned(url("http://x/res"));
        let b = Locator::stable(url("http://x/res"));
        let c = Locator::labelled(url("http://x/res"), "v1".to_string());
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn display_forms() {
        assert_eq!(
            Locator::unversioned(url("http://x/res")).to_string(),
            "http://x/res"
        );
        assert_eq!(
            Locator::labelled(url("http://x/res"), "v1".to_string()).to_string(),
            "http://x/res (label v1)"
        );
        assert_eq!(
            Locator::stable(url("http://x/stable/123")).to_string(),
            "http://x/stable/123 (stable)"
        );
    }

    #[test]
    fn json_shape() {
        let loc = Locator::labelled(url("http://x/res"), "v1".to_string());
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://x/res", "kind": "labelled", "label": "v1"})
        );

        let stable = Locator::stable(url("http://x/stable/123"));
        let json = serde_json::to_value(&stable).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "http://x/stable/123", "kind": "stable"})
        );
        let back: Locator = serde_json::from_value(json).unwrap();
        assert_eq!(back, stable);
    }

    #[test]
    fn deserialize_trims_label() {
        let loc: Locator =
            serde_json::from_str(r#"{"url":"http://x/res","kind":"labelled","label":" v1 "}"#)
                .unwrap();
        assert_eq!(loc.label(), Some("v1"));
    }

    #[test]
    fn deserialize_rejects_what_the_factory_rejects() {
        let inputs = [
            (
                r#"{"url":"http://x/stable/123","kind":"labelled","label":"v1"}"#,
                "stable URL",
            ),
            (
                r#"{"url":"http://x/%73table/123","kind":"labelled","label":"v1"}"#,
                "stable URL",
            ),
            (
                r#"{"url":"http://x/res","kind":"labelled","label":""}"#,
                "label is empty",
            ),
            (
                r#"{"url":"http://x/res","kind":"labelled","label":"v\n1"}"#,
                "control characters",
            ),
        ];
        for (json, expected) in inputs {
            let err = serde_json::from_str::<Locator>(json).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{json}: unexpected error {err}"
            );
        }
    }
}
