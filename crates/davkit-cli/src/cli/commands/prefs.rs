//! `davkit prefs ...` – list, read, and change tooling preferences.

use anyhow::Result;
use davkit_core::prefs::{self, PrefValue, PreferenceKey, Preferences};
use std::path::Path;

use crate::cli::PrefsAction;

pub fn run_prefs(action: PrefsAction) -> Result<()> {
    let path = prefs::default_path()?;
    for line in apply(&path, action)? {
        println!("{line}");
    }
    Ok(())
}

/// Run `action` against the preferences file at `path` and return the lines to print.
pub fn apply(path: &Path, action: PrefsAction) -> Result<Vec<String>> {
    let mut store = Preferences::load(path)?;

    let lines = match action {
        PrefsAction::List => store
            .iter()
            .map(|(key, value)| {
                let marker = if store.is_overridden(key) { "*" } else { " " };
                format!("{marker} {:<45} {value}", key.as_str())
            })
            .collect(),
        PrefsAction::Get { key } => {
            let key: PreferenceKey = key.parse()?;
            vec![store.get(key).to_string()]
        }
        PrefsAction::Set { key, value } => {
            let key: PreferenceKey = key.parse()?;
            let value = PrefValue::parse_for(key, &value)?;
            store.set(key, value.clone())?;
            store.save(path)?;
            tracing::info!("set {} = {}", key, value);
            vec![format!("{key} = {value}")]
        }
        PrefsAction::Reset { key } => {
            let key: PreferenceKey = key.parse()?;
            if store.reset(key) {
                store.save(path)?;
            }
            vec![format!("{key} = {}", store.get(key))]
        }
    };
    Ok(lines)
}
