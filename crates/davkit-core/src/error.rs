//! Errors raised while constructing locators.

use thiserror::Error;

/// Input-contract violation when building a [`Locator`](crate::locator::Locator).
///
/// Every variant is an invalid-argument failure: construction is pure, so
/// there is nothing to retry and nothing to clean up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("resource URL is empty")]
    EmptyUrl,

    #[error("invalid resource URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {scheme:?} in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("version label is empty")]
    EmptyLabel,

    #[error("version label {label:?} contains control characters")]
    InvalidLabel { label: String },

    /// Stable URLs already identify one version; they cannot be combined with a label.
    #[error("{url} is a stable URL and cannot be combined with a label")]
    StableUrlWithLabel { url: String },
}

impl LocatorError {
    /// True for every variant; kept so callers can branch on the error class
    /// without matching each variant.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            LocatorError::EmptyUrl
            | LocatorError::InvalidUrl { .. }
            | LocatorError::UnsupportedScheme { .. }
            | LocatorError::EmptyLabel
            | LocatorError::InvalidLabel { .. }
            | LocatorError::StableUrlWithLabel { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_offending_input() {
        let err = LocatorError::StableUrlWithLabel {
            url: "http://x/stable/1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "http://x/stable/1 is a stable URL and cannot be combined with a label"
        );

        let err = LocatorError::InvalidLabel {
            label: "v\u{7}1".to_string(),
        };
        assert!(err.to_string().contains("control characters"));
    }

    #[test]
    fn invalid_url_keeps_parse_error_as_source() {
        use std::error::Error as _;
        let err = LocatorError::InvalidUrl {
            url: "::".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert!(err.source().is_some());
        assert!(err.is_invalid_argument());
    }
}
