use crate::events::AppEvent;
use crate::sys::launcher::ExecCommand;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit_core::{Direction, RadialLayout};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Sentinel command of the built-in setup item: opens the config file instead
/// of running anything.
pub const SETUP_COMMAND: &str = "ORBIT_SETUP";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub label: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub exec: Option<ExecCommand>,
    #[serde(default)]
    pub hidden: bool,
}

fn full_circle() -> [f64; 2] {
    [0.0, 360.0]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayerConfig {
    pub name: String,
    /// Start and end of the arc, in degrees clockwise from up.
    #[serde(default = "full_circle")]
    pub angular_range: [f64; 2],
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub reserve_space_for_hidden: bool,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl LayerConfig {
    pub fn layout(&self) -> RadialLayout {
        let [start, end] = self.angular_range;
        RadialLayout::new((start.to_radians(), end.to_radians()), self.direction)
            .with_reserved_hidden(self.reserve_space_for_hidden)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl Config {
    /// Menu shown when there is no usable config file yet.
    pub fn setup() -> Self {
        Self {
            layers: vec![LayerConfig {
                name: "Main".to_string(),
                angular_range: full_circle(),
                direction: Direction::Clockwise,
                reserve_space_for_hidden: false,
                items: vec![ItemConfig {
                    label: "Setup".to_string(),
                    target: None,
                    exec: Some(ExecCommand::from(SETUP_COMMAND)),
                    hidden: false,
                }],
            }],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for layer in &self.layers {
            if layer.name.trim().is_empty() {
                return Err(ConfigError::EmptyLayerName);
            }
            if !names.insert(layer.name.as_str()) {
                return Err(ConfigError::DuplicateLayer(layer.name.clone()));
            }
        }

        for layer in &self.layers {
            for item in &layer.items {
                if let Some(target) = item.target.as_deref()
                    && !target.is_empty()
                    && !names.contains(target)
                {
                    log::warn!(
                        "Item '{}' in layer '{}' targets unknown layer '{}'",
                        item.label,
                        layer.name,
                        target
                    );
                }
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Layer names must not be empty")]
    EmptyLayerName,
    #[error("Layer '{0}' is defined more than once")]
    DuplicateLayer(String),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ORBIT"))
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return Config::setup();
    }

    match load_config() {
        Ok(c) if !c.layers.is_empty() => c,
        Ok(_) => {
            log::warn!("Config defines no layers, showing setup menu");
            Config::setup()
        }
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            Config::setup()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
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

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_default_config_is_valid() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert!(!config.layers.is_empty());
        assert_eq!(config.layers[0].name, "Main");
    }

    #[test]
    fn test_layer_defaults_and_degrees() {
        let config = parse_config(
            r#"
            [[layers]]
            name = "Main"

            [[layers]]
            name = "Half"
            angular_range = [90, 270]
            direction = "CCW"
            reserve_space_for_hidden = true
            items = [{ label = "a", target = "Main" }, { label = "b", hidden = true }]
            "#,
        )
        .unwrap();

        let main = config.layers[0].layout();
        assert_eq!(main.direction, Direction::Clockwise);
        assert!((main.angular_range.1 - 2.0 * PI).abs() < 1e-12);

        let half = &config.layers[1];
        let layout = half.layout();
        assert_eq!(layout.direction, Direction::Anticlockwise);
        assert!(layout.reserve_space_for_hidden);
        assert!((layout.angular_range.0 - PI / 2.0).abs() < 1e-12);
        assert_eq!(half.items[0].target.as_deref(), Some("Main"));
        assert!(half.items[1].hidden);
    }

    #[test]
    fn test_duplicate_layers_are_rejected() {
        let err = parse_config(
            r#"
            [[layers]]
            name = "Main"
            [[layers]]
            name = "Main"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateLayer(name) if name == "Main"));
    }

    #[test]
    fn test_setup_menu_is_valid() {
        let setup = Config::setup();
        assert!(setup.validate().is_ok());
        assert_eq!(
            setup.layers[0].items[0].exec.as_ref().map(|e| e.as_str()),
            Some(SETUP_COMMAND)
        );
    }

    #[test]
    fn test_item_config_deserialization() {
        let item: ItemConfig =
            serde_json::from_str(r#"{ "label": "Term", "exec": "kitty --single-instance" }"#)
                .unwrap();
        assert_eq!(item.label, "Term");
        assert!(item.target.is_none());
        assert!(!item.hidden);
        assert_eq!(
            item.exec.map(|e| e.to_string()),
            Some("kitty --single-instance".to_string())
        );
    }
}
