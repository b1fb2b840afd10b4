//! Resource locators for versioned WebDAV resources.
//!
//! Build locators through a [`LocatorFactory`]; [`DefaultLocatorFactory`]
//! reads its settings from [`config::DavkitConfig`].

pub mod config;
pub mod error;
pub mod factory;
pub mod locator;
pub mod logging;
pub mod prefs;
pub mod stable;

pub use error::LocatorError;
pub use factory::{DefaultLocatorFactory, LocatorFactory};
pub use locator::{Locator, LocatorKind};
pub use stable::StableUrlPolicy;
