// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

use crate::gateway::gemini;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub gemini_api_base: Url,
    pub gemini_model: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let gemini_api_base = env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| gemini::DEFAULT_API_BASE.to_string())
            .parse()
            .expect("GEMINI_API_BASE must be a valid URL");

        let gemini_model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| gemini::DEFAULT_MODEL.to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            gemini_api_base,
            gemini_model,
            rust_log,
        }
    }
}
