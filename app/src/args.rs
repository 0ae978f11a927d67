use clap::Parser;
use pgwh::config::{
    DEFAULT_CHANNEL, DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_PASSWORD, DEFAULT_DB_PORT,
    DEFAULT_DB_SSLMODE, DEFAULT_DB_USER, DEFAULT_WEBHOOK_URL,
};
use pgwh::{BridgeConfig, DatabaseParams};

/// Forwards PostgreSQL NOTIFY change events to an HTTP webhook.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Full connection string; overrides every DB_* setting
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_HOST", default_value = DEFAULT_DB_HOST)]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = DEFAULT_DB_USER)]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = DEFAULT_DB_PASSWORD, hide_env_values = true)]
    pub db_password: String,

    #[arg(long, env = "DB_NAME", default_value = DEFAULT_DB_NAME)]
    pub db_name: String,

    #[arg(long, env = "DB_SSLMODE", default_value = DEFAULT_DB_SSLMODE)]
    pub db_sslmode: String,

    #[arg(long, env = "WEBHOOK_URL", default_value = DEFAULT_WEBHOOK_URL)]
    pub webhook_url: String,

    #[arg(long, env = "CHANNEL", default_value = DEFAULT_CHANNEL)]
    pub channel: String,
}

impl Args {
    pub fn to_database_params(&self) -> DatabaseParams {
        DatabaseParams {
            host: or_default(&self.db_host, DEFAULT_DB_HOST),
            port: self.db_port,
            user: or_default(&self.db_user, DEFAULT_DB_USER),
            password: or_default(&self.db_password, DEFAULT_DB_PASSWORD),
            dbname: or_default(&self.db_name, DEFAULT_DB_NAME),
            sslmode: or_default(&self.db_sslmode, DEFAULT_DB_SSLMODE),
        }
    }

    pub fn to_bridge_config(&self) -> BridgeConfig {
        let database_url = match self.database_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.to_database_params().to_url(),
        };

        BridgeConfig::new(
            database_url,
            or_default(&self.webhook_url, DEFAULT_WEBHOOK_URL),
            or_default(&self.channel, DEFAULT_CHANNEL),
        )
    }
}

// An empty variable counts as unset.
fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
