//! Tooling preference keys and a small TOML-backed store for them.
//!
//! Keys keep the string form the host tooling uses (`Drools.BuildAll`, ...),
//! so a preferences file written here can be read by anything keyed on those
//! strings. Only overrides are persisted; every key has a typed default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefError {
    #[error("unknown preference key {0:?}")]
    UnknownKey(String),

    #[error("{key} expects a {expected} value, got {got}")]
    TypeMismatch {
        key: PreferenceKey,
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: PreferenceKey,
        value: String,
        expected: &'static str,
    },

    #[error("preferences file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

macro_rules! preference_keys {
    ($($variant:ident => $key:literal, $slug:literal, $default:expr;)+) => {
        /// A preference key of the rule tooling.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum PreferenceKey {
            $($variant,)+
        }

        impl PreferenceKey {
            pub const ALL: &'static [PreferenceKey] = &[$(PreferenceKey::$variant,)+];

            /// The key string used in preference files.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(PreferenceKey::$variant => $key,)+
                }
            }

            /// Kebab-case name accepted on the command line.
            pub fn slug(self) -> &'static str {
                match self {
                    $(PreferenceKey::$variant => $slug,)+
                }
            }

            pub fn default_value(self) -> PrefValue {
                match self {
                    $(PreferenceKey::$variant => $default,)+
                }
            }
        }
    };
}

preference_keys! {
    BuildAll => "Drools.BuildAll", "build-all", PrefValue::Bool(false);
    CrossBuild => "Drools.CrossBuild", "cross-build", PrefValue::Bool(false);
    EditorFolding => "Drools.EditorFolding", "editor-folding", PrefValue::Bool(true);
    CacheParsedRules => "Drools.CacheParsedRules", "cache-parsed-rules", PrefValue::Bool(true);
    DrlEditorMatchingBrackets => "Drools.DRLMatchingBrackets", "drl-matching-brackets", PrefValue::Bool(true);
    DrlEditorMatchingBracketsColor => "Drools.DRLMatchingBracketsColor", "drl-matching-brackets-color", PrefValue::Text("0,128,128".to_string());
    DslRuleEditorCompletionFullSentences => "Drools.DSLRuleEditorCompletionFullSentences", "dsl-completion-full-sentences", PrefValue::Bool(true);
    Skin => "Drools.Flow.Skin", "flow-skin", PrefValue::Text("BPMN2".to_string());
    AllowNodeCustomization => "Drools.Flow.AllowNodeCustomization", "allow-node-customization", PrefValue::Bool(false);
    DroolsRuntimes => "Drools.Runtimes", "runtimes", PrefValue::Text(String::new());
    InternalApi => "Drools.InternalAPI", "internal-api", PrefValue::Int(0);
    FlowNodes => "Drools.FlowNodes", "flow-nodes", PrefValue::Text(String::new());
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = PrefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s || k.slug() == s)
            .ok_or_else(|| PrefError::UnknownKey(s.to_string()))
    }
}

/// A preference value. Stored untagged so the TOML file reads naturally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl PrefValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "boolean",
            PrefValue::Int(_) => "integer",
            PrefValue::Text(_) => "string",
        }
    }

    /// Parse command-line text into the type of `key`'s default.
    pub fn parse_for(key: PreferenceKey, raw: &str) -> Result<Self, PrefError> {
        let invalid = |expected| PrefError::InvalidValue {
            key,
            value: raw.to_string(),
            expected,
        };
        match key.default_value() {
            PrefValue::Bool(_) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(PrefValue::Bool(true)),
                "false" | "off" | "no" | "0" => Ok(PrefValue::Bool(false)),
                _ => Err(invalid("boolean")),
            },
            PrefValue::Int(_) => raw
                .trim()
                .parse()
                .map(PrefValue::Int)
                .map_err(|_| invalid("integer")),
            PrefValue::Text(_) => Ok(PrefValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{b}"),
            PrefValue::Int(i) => write!(f, "{i}"),
            PrefValue::Text(s) => f.write_str(s),
        }
    }
}

/// Preference overrides on top of the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    overrides: BTreeMap<PreferenceKey, PrefValue>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective value: the override if set, otherwise the default.
    pub fn get(&self, key: PreferenceKey) -> PrefValue {
        self.overrides
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    pub fn is_overridden(&self, key: PreferenceKey) -> bool {
        self.overrides.contains_key(&key)
    }

    /// Set an override. The value must have the same type as the default.
    pub fn set(&mut self, key: PreferenceKey, value: PrefValue) -> Result<(), PrefError> {
        let expected = key.default_value();
        if std::mem::discriminant(&expected) != std::mem::discriminant(&value) {
            return Err(PrefError::TypeMismatch {
                key,
                expected: expected.type_name(),
                got: value.type_name(),
            });
        }
        if value == expected {
            self.overrides.remove(&key);
        } else {
            self.overrides.insert(key, value);
        }
        Ok(())
    }

    /// Drop the override for `key`. Returns whether one was set.
    pub fn reset(&mut self, key: PreferenceKey) -> bool {
        self.overrides.remove(&key).is_some()
    }

    /// All keys with their effective values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (PreferenceKey, PrefValue)> + '_ {
        PreferenceKey::ALL.iter().map(|&k| (k, self.get(k)))
    }

    /// Load overrides from `path`. A missing file yields all defaults.
    pub fn load(path: &Path) -> Result<Self, PrefError> {
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PrefError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let raw: BTreeMap<String, PrefValue> =
            toml::from_str(&data).map_err(|source| PrefError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut prefs = Self::default();
        for (name, value) in raw {
            let key: PreferenceKey = name.parse()?;
            prefs.set(key, value)?;
        }
        tracing::debug!(
            "loaded {} preference overrides from {}",
            prefs.overrides.len(),
            path.display()
        );
        Ok(prefs)
    }

    /// Write overrides to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), PrefError> {
        let raw: BTreeMap<&str, &PrefValue> = self
            .overrides
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        let data = toml::to_string_pretty(&raw)?;
        let io_err = |source| PrefError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, data).map_err(io_err)?;
        tracing::info!("saved preferences to {}", path.display());
        Ok(())
    }
}

/// `~/.config/davkit/preferences.toml`.
pub fn default_path() -> Result<PathBuf, PrefError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("davkit")?;
    Ok(xdg_dirs.get_config_home().join("preferences.toml"))
}
