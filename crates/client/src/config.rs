use serde::Deserialize;

use crate::{cli::GlobalArgs, error::Result, snapshot::default_state_path};

const DEFAULT_CONFIG_PATH: &str = "config/finance.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `http://127.0.0.1:3000/api`.
    pub base_url: String,
    /// Where the local snapshot of both collections is kept.
    pub state_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            state_path: default_state_path().to_string(),
        }
    }
}

/// Resolve the configuration: file, then `FINANCE_CLI_*` environment, then flags.
pub fn load(args: &GlobalArgs) -> Result<ClientConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINANCE_CLI"));
    let mut settings: ClientConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(state_path) = &args.state_path {
        settings.state_path = state_path.clone();
    }

    Ok(settings)
}
