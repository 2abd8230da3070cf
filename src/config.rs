use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub mail: MailConfig,

    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "POSTBOX_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "POSTBOX_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health) endpoints
    #[arg(long, env = "POSTBOX_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct MailConfig {
    /// SendGrid API key; when unset, submissions are saved to the local contact log instead
    #[arg(long, env = "POSTBOX_SENDGRID_API_KEY")]
    pub sendgrid_api_key: Option<String>,

    /// Base URL of the SendGrid API
    #[arg(long, env = "POSTBOX_SENDGRID_API_BASE", default_value = "https://api.sendgrid.com")]
    pub api_base: String,

    /// From-address for outgoing mail; defaults to no-reply@{site_domain}
    #[arg(long, env = "POSTBOX_SENDGRID_SENDER")]
    pub sender: Option<String>,

    /// Domain used to derive the default sender address
    #[arg(long, env = "POSTBOX_SITE_DOMAIN", default_value = "example.com")]
    pub site_domain: String,

    /// Address that receives contact submissions
    #[arg(long, env = "POSTBOX_RECEIVER_EMAIL", default_value = "owner@example.com")]
    pub receiver: String,

    /// Send a best-effort thank-you autoreply to the submitter
    #[arg(long, env = "POSTBOX_SENDGRID_AUTOREPLY", default_value_t = false)]
    pub autoreply: bool,

    /// Name used in the autoreply subject and signature
    #[arg(long, env = "POSTBOX_OWNER_NAME", default_value = "me")]
    pub owner_name: String,
}

impl MailConfig {
    /// The effective from-address: the configured sender, or a derived no-reply address.
    #[must_use]
    pub fn sender_address(&self) -> String {
        self.sender.clone().unwrap_or_else(|| format!("no-reply@{}", self.site_domain))
    }
}

#[derive(Clone, Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the local contact log (contacts.json)
    #[arg(long, env = "POSTBOX_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed on the contact endpoint
    #[arg(long, env = "POSTBOX_RATE_LIMIT_PER_SECOND", default_value_t = 2)]
    pub per_second: u32,

    /// Burst allowance for the contact endpoint
    #[arg(long, env = "POSTBOX_RATE_LIMIT_BURST", default_value_t = 5)]
    pub burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "POSTBOX_LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
