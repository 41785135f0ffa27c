use std::{collections::HashMap, fs};

use backend_client::{BackendConfig, DEFAULT_REPLY_FUNCTION, DEFAULT_STORAGE_BUCKET};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub backend_url: String,
    pub backend_anon_key: String,
    pub storage_bucket: String,
    pub reply_function: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            backend_url: "http://127.0.0.1:54321".into(),
            backend_anon_key: String::new(),
            storage_bucket: DEFAULT_STORAGE_BUCKET.into(),
            reply_function: DEFAULT_REPLY_FUNCTION.into(),
        }
    }
}

impl Settings {
    pub fn backend_config(&self) -> anyhow::Result<BackendConfig> {
        if self.backend_anon_key.trim().is_empty() {
            anyhow::bail!("backend anon key is not configured; set BACKEND_ANON_KEY");
        }
        let mut config = BackendConfig::new(&self.backend_url, &self.backend_anon_key);
        config.storage_bucket = self.storage_bucket.clone();
        config.reply_function = self.reply_function.clone();
        Ok(config)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    let text = |key: &str| file_cfg.get(key).and_then(|v| v.as_str()).map(str::to_string);

    if let Some(v) = text("bind_addr") {
        settings.server_bind = v;
    }
    if let Some(v) = text("backend_url") {
        settings.backend_url = v;
    }
    if let Some(v) = text("backend_anon_key") {
        settings.backend_anon_key = v;
    }
    if let Some(v) = text("storage_bucket") {
        settings.storage_bucket = v;
    }
    if let Some(v) = text("reply_function") {
        settings.reply_function = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = var("BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = var("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    if let Some(v) = var("BACKEND_ANON_KEY") {
        settings.backend_anon_key = v;
    }
    if let Some(v) = var("APP__BACKEND_ANON_KEY") {
        settings.backend_anon_key = v;
    }

    if let Some(v) = var("APP__STORAGE_BUCKET") {
        settings.storage_bucket = v;
    }
    if let Some(v) = var("APP__REPLY_FUNCTION") {
        settings.reply_function = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
