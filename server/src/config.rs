//! CLI configuration for the server binary. Flags fall back to environment
//! variables, then to compiled defaults.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Minimal task tracker HTTP server")]
pub struct ServerArgs {
    /// Address to bind, e.g. 127.0.0.1:3000.
    #[arg(short, long, env = "TASKTRACK_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, env = "TASKTRACK_LOG", default_value = "info")]
    pub log_level: String,
}
