use std::{path::PathBuf, time::Duration};

use clap::Parser;
use probe_observe::{LoggerFormat, LoggerLevel};

/// Runs configured check scripts and exposes the results to Prometheus.
#[derive(Debug, Parser)]
#[command(name = "probe-agentd", version)]
pub struct Cli {
    /// Configuration file or directory; repeat to merge several sources in order.
    #[arg(long = "config.file", value_name = "PATH", default_value = "script-exporter.yml")]
    pub config_files: Vec<PathBuf>,

    /// Address to listen on for the web interface.
    #[arg(long = "web.listen-address", value_name = "ADDR", default_value = "0.0.0.0:9172")]
    pub listen_address: String,

    /// Deadline in seconds for scripts without a timeout; 0 lets them run to completion.
    #[arg(long = "timeout.default", value_name = "SECONDS", default_value_t = 0)]
    pub default_timeout: u64,

    /// Seconds to wait for in-flight requests after a shutdown signal before exiting anyway.
    #[arg(long = "web.shutdown-timeout", value_name = "SECONDS", default_value_t = 10)]
    pub shutdown_timeout: u64,

    /// Log level or filter directive.
    #[arg(long = "log.level", value_name = "LEVEL", default_value = "info")]
    pub log_level: LoggerLevel,

    /// Log output format: text, json or journald.
    #[arg(long = "log.format", value_name = "FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Print the merged canonical configuration and exit.
    #[arg(long = "config.print")]
    pub config_print: bool,
}

impl Cli {
    pub fn default_timeout(&self) -> Option<Duration> {
        (self.default_timeout > 0).then(|| Duration::from_secs(self.default_timeout))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}
