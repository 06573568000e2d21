use anyhow::Result;

use crate::core::config::{validate_satellite_url, AppConfig};

pub fn init(url: Option<String>, token: Option<String>) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    let mut config = AppConfig::default();
    if let Some(url) = url {
        if let Err(issue) = validate_satellite_url(&url) {
            eprintln!("{}", issue);
            std::process::exit(1);
        }
        config.satellite.url = url;
    }
    config.satellite.token = token;

    match config.save() {
        Ok(path) => {
            println!("Generated config at {}", path.display());
            println!("  Satellite: {}", config.satellite.url);
            if config.satellite.token.is_none() {
                println!("  No session token set. Add one under [satellite] or export STORX_TOKEN.");
            }
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Update the satellite url and/or session token of an existing config.
pub fn set(url: Option<String>, token: Option<String>) -> Result<()> {
    if url.is_none() && token.is_none() {
        eprintln!("Nothing to set. Pass --url and/or --token.");
        std::process::exit(1);
    }

    let mut config = AppConfig::load_file()?;
    if let Some(url) = url {
        if let Err(issue) = validate_satellite_url(&url) {
            eprintln!("{}", issue);
            std::process::exit(1);
        }
        config.satellite.url = url;
    }
    if token.is_some() {
        config.satellite.token = token;
    }

    let path = config.save()?;
    println!("Updated config at {}", path.display());
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn check() -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `sxb config init` to create one.");
        return Ok(());
    }

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        println!("Config is valid: {}", path.display());
        println!("  Satellite: {}", config.satellite.url);
        println!(
            "  Session token: {}",
            if config.satellite.token.is_some() { "set" } else { "not set" }
        );
    } else {
        eprintln!("Config issues found in {}:", path.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}
