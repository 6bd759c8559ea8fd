use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub canvas: CanvasConfig,
    pub editor: EditorDefaults,
    pub features: FeatureFlags,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Zoom bounds and resize floor for the canvas.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub min_block_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 2.0,
            zoom_step: 0.1,
            min_block_size: 20.0,
        }
    }
}

/// Defaults used when the editor places a new block.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorDefaults {
    pub grid_rows: u32,
    pub grid_columns: u32,
    pub standing_capacity: u32,
    pub area_width: f64,
    pub area_height: f64,
    pub spawn_x: f64,
    pub spawn_y: f64,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            grid_rows: 5,
            grid_columns: 10,
            standing_capacity: 100,
            area_width: 200.0,
            area_height: 120.0,
            spawn_x: 50.0,
            spawn_y: 50.0,
        }
    }
}

// Feature flags для включения/выключения функциональности
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    pub enable_cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                environment: "development".to_string(),
                rust_log: "seating_layout=debug,tower_http=debug".to_string(),
                log_format: LogFormat::Pretty,
            },
            canvas: CanvasConfig::default(),
            editor: EditorDefaults::default(),
            features: FeatureFlags { enable_cors: true },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let canvas_defaults = CanvasConfig::default();
        let editor_defaults = EditorDefaults::default();

        let canvas = CanvasConfig {
            zoom_min: parse_or("ZOOM_MIN", canvas_defaults.zoom_min, "number")?,
            zoom_max: parse_or("ZOOM_MAX", canvas_defaults.zoom_max, "number")?,
            zoom_step: parse_or("ZOOM_STEP", canvas_defaults.zoom_step, "number")?,
            min_block_size: parse_or("MIN_BLOCK_SIZE", canvas_defaults.min_block_size, "number")?,
        };
        if !(canvas.zoom_min > 0.0 && canvas.zoom_min <= canvas.zoom_max) {
            return Err(ConfigError::ZoomRange {
                min: canvas.zoom_min,
                max: canvas.zoom_max,
            });
        }

        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_or("PORT", 8000, "port number")?,
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seating_layout=debug,tower_http=debug".to_string()),
                log_format: parse_or("LOG_FORMAT", LogFormat::Pretty, "log format (pretty|json)")?,
            },
            canvas,
            editor: EditorDefaults {
                grid_rows: parse_or("DEFAULT_GRID_ROWS", editor_defaults.grid_rows, "number")?,
                grid_columns: parse_or("DEFAULT_GRID_COLUMNS", editor_defaults.grid_columns, "number")?,
                standing_capacity: parse_or(
                    "DEFAULT_STANDING_CAPACITY",
                    editor_defaults.standing_capacity,
                    "number",
                )?,
                ..editor_defaults
            },
            features: FeatureFlags {
                enable_cors: parse_or("ENABLE_CORS", true, "boolean")?,
            },
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, expected, value }),
        Err(_) => Ok(default),
    }
}
