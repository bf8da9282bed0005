use directories::ProjectDirs;
use epochs::panel::Timings;
use epochs::section::{Section, SectionError, SectionTable};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub timings: Timings,
}

impl Config {
    pub fn into_parts(self) -> Result<(SectionTable, Timings), ConfigError> {
        Ok((SectionTable::new(self.sections)?, self.timings))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Section error: {0}")]
    Sections(#[from] SectionError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "timewheel", "timewheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Reads the user's config file, or the built-in table when there is none.
/// `TIMEWHEEL_TIMINGS__ROTATION_SECS=0.8` style variables override either.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    build_config(config_path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TIMEWHEEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn build_config(config_path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();
    // the user file replaces the built-in one; merging would splice the sections arrays
    let builder = if config_path.exists() {
        builder.add_source(config::File::from(config_path))
    } else {
        builder.add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
    };

    let s = builder.add_source(env).build()?;
    Ok(s.try_deserialize()?)
}

pub fn default_config() -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()?;
    Ok(s.try_deserialize()?)
}

/// Falls back to the built-in table when the user's file is broken, so a
/// typo never keeps the window from opening.
pub fn load_or_default() -> Result<(SectionTable, Timings), ConfigError> {
    or_default(load_config())
}

fn or_default(loaded: Result<Config, ConfigError>) -> Result<(SectionTable, Timings), ConfigError> {
    match loaded.and_then(Config::into_parts) {
        Ok(parts) => Ok(parts),
        Err(e) => {
            log::error!("Failed to load config, using built-in sections: {}", e);
            default_config()?.into_parts()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Seeds `path` with the built-in table. An existing file is left alone.
pub fn write_default_config_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;
use std::time::Duration;

/// Editors save in several steps; everything inside this window is one reload.
const RELOAD_SETTLE: Duration = Duration::from_millis(200);

fn touches_config(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    // the file itself may be replaced on save, so watch its directory
    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(e) => {
                log::error!("Watch error: {}", e);
                continue;
            }
        };
        if !touches_config(&event, &config_path) {
            continue;
        }

        tokio::time::sleep(RELOAD_SETTLE).await;
        while bridge_rx.try_recv().is_ok() {}

        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}
