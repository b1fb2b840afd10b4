//! `davkit locate <url>` – build a locator and print it.

use anyhow::{Context, Result};
use davkit_core::config::{DavkitConfig, OutputFormat, ValidationMode};
use davkit_core::{DefaultLocatorFactory, Locator, LocatorFactory};

#[derive(Debug, Clone, Default)]
pub struct LocateArgs {
    pub url: String,
    pub label: Option<String>,
    pub stable: bool,
    pub json: bool,
    pub lenient: bool,
}

/// Build the locator described by `args` using a factory configured from `cfg`.
pub fn build_locator(cfg: &DavkitConfig, args: &LocateArgs) -> Result<Locator> {
    let mut cfg = cfg.clone();
    if args.lenient {
        cfg.validation = ValidationMode::Lenient;
    }
    let factory = DefaultLocatorFactory::from_config(&cfg);

    let locator = match (&args.label, args.stable) {
        (Some(label), _) => factory.new_labelled_locator(&args.url, label),
        (None, true) => factory.new_stable_locator(&args.url),
        (None, false) => factory.new_locator(&args.url),
    }
    .with_context(|| format!("cannot build locator for {}", args.url))?;
    Ok(locator)
}

pub fn render(locator: &Locator, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(locator.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(locator)?),
    }
}

pub fn run_locate(cfg: &DavkitConfig, args: &LocateArgs) -> Result<()> {
    let locator = build_locator(cfg, args)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        cfg.default_output
    };
    println!("{}", render(&locator, format)?);
    Ok(())
}
