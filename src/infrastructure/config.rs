use crate::domain::panel::Panel;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    /// Overrides for theme color names, e.g. `green = "#37872D"`
    #[serde(default)]
    pub palette: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_address: String,
    pub log_filter: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PanelsConfig {
    #[serde(default)]
    pub panels: Vec<Panel>,
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("server.bind_address", "0.0.0.0:8080")?
        .set_default("server.log_filter", "info")?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(config::Environment::with_prefix("SINGLESTAT").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_panels_config() -> anyhow::Result<PanelsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/panels").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a display string.
/// Both `${name}` and `$name` forms are recognized.
pub fn interpolate_variables(template: &str, vars: &HashMap<String, String>) -> String {
    if !template.contains('$') {
        return template.to_string();
    }

    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("${{{}}}", key), value);
        result = result.replace(&format!("${}", key), value);
    }
    result
}
