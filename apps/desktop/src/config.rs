use std::{collections::HashMap, fs};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3001".into(),
        }
    }
}

/// Defaults, then `search.toml`, then environment. Flag overrides are
/// applied by the caller.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("search.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("SEARCH_SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_overrides_the_default_server_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = \"http://10.0.0.5:3001\"\n");
        assert_eq!(settings.server_url, "http://10.0.0.5:3001");
    }

    #[test]
    fn unknown_keys_and_bad_toml_leave_settings_untouched() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "other_key = \"value\"\n");
        assert_eq!(settings, Settings::default());

        apply_file_config(&mut settings, "not even toml ===");
        assert_eq!(settings, Settings::default());
    }
}
