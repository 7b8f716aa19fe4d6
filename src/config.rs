use clap::Parser;
use std::{num::NonZeroUsize, path::PathBuf, time::Duration};
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://2swdepm0wa.execute-api.us-east-1.amazonaws.com/prod/NavaInterview/measures";

/// Parse fixed-width data files against their schemas and POST every record.
#[derive(Parser, Debug, Clone)]
#[command(name = "fwingest", version)]
pub struct Config {
    /// Directory holding `<name>.csv` schema files
    #[arg(long, env = "FWINGEST_SCHEMAS_DIR", default_value = "schemas")]
    pub schemas_dir: PathBuf,

    /// Directory holding `<name>.txt` data files
    #[arg(long, env = "FWINGEST_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Collection endpoint; each record is POSTed here as JSON
    #[arg(long, env = "FWINGEST_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Maximum requests in flight per pair
    #[arg(long, env = "FWINGEST_CONCURRENCY", default_value = "4")]
    pub concurrency: NonZeroUsize,

    /// Per-request timeout in seconds
    #[arg(long, env = "FWINGEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Records whose JSON body is larger than this are not sent
    #[arg(long, env = "FWINGEST_MAX_PAYLOAD_BYTES", default_value_t = 64 * 1024)]
    pub max_payload_bytes: usize,

    /// Log records instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::try_parse_from(["fwingest"]).unwrap();
        assert_eq!(cfg.schemas_dir, PathBuf::from("schemas"));
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.concurrency.get(), 4);
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.max_payload_bytes, 65536);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "fwingest",
            "--schemas-dir",
            "/in/s",
            "--endpoint",
            "http://localhost:8080/ingest",
            "--concurrency",
            "16",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cfg.schemas_dir, PathBuf::from("/in/s"));
        assert_eq!(cfg.endpoint.host_str(), Some("localhost"));
        assert_eq!(cfg.concurrency.get(), 16);
        assert!(cfg.dry_run);
    }

    #[test]
    fn rejects_zero_concurrency_and_bad_urls() {
        assert!(Config::try_parse_from(["fwingest", "--concurrency", "0"]).is_err());
        assert!(Config::try_parse_from(["fwingest", "--endpoint", "not a url"]).is_err());
    }
}
