use dotenvy::dotenv;
use log::{error, info};
use serde::Deserialize;
use std::env;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub data_url: String,
    pub submit_url: String,
    pub map_center_lat: f64,
    pub map_center_lng: f64,
    pub map_zoom: u8,
    pub tile_layer_url: String,
    pub tile_attribution: String,
    pub main_marker_icon_url: String,
    pub main_marker_size: u32,
    pub offer_marker_icon_url: String,
    pub offer_marker_size: u32,
    pub max_markers: usize,
    pub alert_duration_ms: u64,
    pub debounce_ms: u64,
    pub low_price_max: u64,
    pub high_price_min: u64,
    pub address_precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_url: "https://24.javascript.pages.academy/keksobooking/data".to_string(),
            submit_url: "https://24.javascript.pages.academy/keksobooking".to_string(),
            map_center_lat: 35.6895,
            map_center_lng: 139.692,
            map_zoom: 10,
            tile_layer_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            main_marker_icon_url: "./img/main-pin.svg".to_string(),
            main_marker_size: 52,
            offer_marker_icon_url: "./img/pin.svg".to_string(),
            offer_marker_size: 40,
            max_markers: 10,
            alert_duration_ms: 5000,
            debounce_ms: 500,
            low_price_max: 10000,
            high_price_min: 50000,
            address_precision: 5,
        }
    }
}

pub fn create_test_config() -> Config {
    Config {
        data_url: "http://127.0.0.1:1/keksobooking/data".to_string(),
        submit_url: "http://127.0.0.1:1/keksobooking".to_string(),
        debounce_ms: 100,
        ..Config::default()
    }
}

pub fn read_config() -> Config {
    dotenv().ok();

    let config_path = match env::var(CONFIG_PATH_ENV) {
        Ok(path) => path,
        Err(_) => {
            info!("{CONFIG_PATH_ENV} not set, using default config");
            return Config::default();
        }
    };

    std::fs::read(&config_path)
        .map_err(|e| format!("{config_path}: {e}"))
        .and_then(|bytes| toml::from_slice(&bytes).map_err(|e| e.to_string()))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
