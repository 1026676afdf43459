use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// FreshBay - food donor and receiver signup service
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "FB_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "FB_PORT", default_value = "3000")]
    pub port: String,

    /// Data directory for the session database
    #[arg(long, env = "FB_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Static files directory
    #[arg(long, env = "FB_STATIC_DIR", default_value = "./static")]
    pub static_dir: PathBuf,

    /// Supabase project URL, e.g. https://abcd.supabase.co
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase anonymous (public) API key
    #[arg(long, env = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: String,

    /// How long the browser waits for location permission, in milliseconds
    #[arg(long, env = "FB_GEO_TIMEOUT_MS", default_value = "5000")]
    pub geo_timeout_ms: u64,

    /// Idle lifetime of a rendered signup form, in seconds
    #[arg(long, env = "FB_FORM_TTL_SECS", default_value = "1800")]
    pub form_ttl_secs: u64,

    /// Most signup forms kept live at once
    #[arg(long, env = "FB_MAX_FORMS", default_value = "10000")]
    pub max_forms: usize,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "FB_SECURE_COOKIES", default_value = "false")]
    pub secure_cookies: bool,
}

impl Config {
    /// Get the session database URL
    pub fn get_session_database_url(&self) -> String {
        let db_path = self.data_dir.join("sessions.db");
        format!("sqlite:{}", db_path.display())
    }

    pub fn geo_timeout(&self) -> Duration {
        Duration::from_millis(self.geo_timeout_ms)
    }

    pub fn form_ttl(&self) -> Duration {
        Duration::from_secs(self.form_ttl_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
