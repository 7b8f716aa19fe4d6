use anyhow::{bail, Result};
use clap::Parser;
use fwingest::{
    config::Config,
    process::{process_all, RunReport},
    source::discover_pairs,
    transport::{HttpTransport, LogTransport},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configuration ────────────────────────────────────────────
    let cfg = Config::parse();
    info!(
        schemas_dir = %cfg.schemas_dir.display(),
        data_dir = %cfg.data_dir.display(),
        concurrency = cfg.concurrency.get(),
        dry_run = cfg.dry_run,
        "Configuration"
    );

    // ─── 3) pair schema and data files ───────────────────────────────
    let discovery = discover_pairs(&cfg.schemas_dir, &cfg.data_dir)?;
    info!(
        pairs = discovery.pairs.len(),
        orphans = discovery.orphans(),
        "discovered"
    );

    // ─── 4) parse, decode and send ───────────────────────────────────
    let concurrency = cfg.concurrency.get();
    let report: RunReport = if cfg.dry_run {
        process_all(&discovery, &LogTransport, concurrency).await
    } else {
        let transport =
            HttpTransport::new(cfg.endpoint.clone(), cfg.timeout(), cfg.max_payload_bytes)?;
        info!(endpoint = %transport.endpoint(), "sending records");
        process_all(&discovery, &transport, concurrency).await
    };

    // ─── 5) summary ──────────────────────────────────────────────────
    info!(
        summary = %serde_json::to_string(&report)?,
        sent = report.records_sent(),
        failed = report.records_failed(),
        "all done"
    );
    if !report.is_clean() {
        bail!(
            "{} record(s) failed to send, {} pair(s) failed to process",
            report.records_failed(),
            report.failed_pairs.len()
        );
    }
    Ok(())
}
