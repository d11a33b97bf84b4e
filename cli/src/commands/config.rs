//! Config commands - show and change scan defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use die_core::config::DATABASE_ENV;
use die_core::{ConfigStore, ResultFormat};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOutput {
    path: PathBuf,
    #[serde(flatten)]
    config: die_core::Config,
    effective_database: Option<PathBuf>,
    flags: u32,
}

/// Print the stored configuration.
pub async fn show(store: &ConfigStore, json: bool) -> Result<()> {
    let config = store.load().await?;
    let output = ConfigOutput {
        path: store.path().to_path_buf(),
        effective_database: config.resolve_database(),
        flags: config.scan_flags().bits(),
        config,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let config = &output.config;
    println!("Config file:      {}", output.path.display());
    match (&config.database_path, &output.effective_database) {
        (Some(db), _) => println!("Database:         {}", db.display()),
        (None, Some(db)) => println!("Database:         {} (from ${DATABASE_ENV})", db.display()),
        (None, None) => println!("Database:         library default"),
    }
    println!("Deep scan:        {}", yes_no(config.deep_scan));
    println!("Heuristic scan:   {}", yes_no(config.heuristic_scan));
    println!("Recursive scan:   {}", yes_no(config.recursive_scan));
    println!("All types:        {}", yes_no(config.all_types));
    println!("Format:           {}", config.format);
    println!("Flags:            {:#x}", output.flags);
    Ok(())
}

pub async fn set_db(store: &ConfigStore, path: PathBuf) -> Result<()> {
    // Stored absolute so scans from other directories resolve the same database
    let path = std::path::absolute(&path)
        .with_context(|| format!("Invalid database path {}", path.display()))?;

    store.set_database_path(Some(path.clone())).await?;
    println!("Default database set to {}", path.display());
    Ok(())
}

pub async fn clear_db(store: &ConfigStore) -> Result<()> {
    store.set_database_path(None).await?;
    println!("Default database cleared");
    Ok(())
}

pub async fn set_format(store: &ConfigStore, format: ResultFormat) -> Result<()> {
    store.set_format(format).await?;
    println!("Default format set to {format}");
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use die_core::Config;

    #[test]
    fn test_output_is_flat() {
        let config = Config::default();
        let output = ConfigOutput {
            path: PathBuf::from("/home/u/.die/config.json"),
            effective_database: None,
            flags: config.scan_flags().bits(),
            config,
        };

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["path"], "/home/u/.die/config.json");
        assert_eq!(value["deepScan"], true);
        assert_eq!(value["format"], "text");
        assert_eq!(value["flags"], 1);
        assert!(value["effectiveDatabase"].is_null());
    }

    #[tokio::test]
    async fn test_set_and_clear_db() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.json"));

        set_db(&store, dir.path().join("db")).await.unwrap();
        let config = store.load().await.unwrap();
        assert_eq!(config.database_path, Some(dir.path().join("db")));

        clear_db(&store).await.unwrap();
        assert!(store.load().await.unwrap().database_path.is_none());
    }
}
