pub(crate) mod types;

use std::net::SocketAddr;

use config::{Config, Environment, File};
use serde::Deserialize;
pub(crate) use types::{ServerConfig, SupabaseSettings};

use crate::{init::StartupError, trace_err};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub(crate) server: ServerConfig,
    pub(crate) supabase: SupabaseSettings,
}

impl Settings {
    pub fn new() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or("development".into());

        Settings::from_file(&run_mode)
    }

    pub fn from_file(file_name: &str) -> Result<Self, StartupError> {
        trace_err!(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{file_name}")).required(false))
                .add_source(Environment::with_prefix("APP").separator("__"))
                .build()?
                .try_deserialize(),
            "failed to build app settings"
        )
        .map_err(Into::into)
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server.addr
    }
}

#[cfg(feature = "integration_tests")]
impl Settings {
    pub fn for_tests(supabase_url: &str, anon_key: &str) -> Self {
        Self {
            server: ServerConfig {
                addr: "127.0.0.1:0".parse().expect("valid loopback addr"),
            },
            supabase: SupabaseSettings {
                url: supabase_url.to_string(),
                anon_key: anon_key.to_string(),
            },
        }
    }
}
