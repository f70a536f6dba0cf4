use std::{collections::HashMap, fs};

#[derive(Debug)]
pub struct Settings {
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://dewalaravel.com".into(),
        }
    }
}

/// Resolves the catalog base URL: `places.toml` overrides the built-in
/// default, the `PLACES_BASE_URL` environment variable overrides both.
/// The `--base-url` CLI flag, handled in main, wins over everything.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("places.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("base_url") {
                settings.base_url = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("PLACES_BASE_URL") {
        settings.base_url = v;
    }

    settings.base_url = normalize_base_url(&settings.base_url);
    settings
}

/// Trims whitespace and a trailing slash so photo-reference concatenation
/// yields single-slash URIs. An empty value falls back to the default.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Settings::default().base_url;
    }

    trimmed.to_string()
}
