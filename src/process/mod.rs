pub mod coerce;
pub mod decode;
pub mod record;

pub use coerce::{coerce, Coercion};
pub use decode::{parse_data, Decoded};
pub use record::{Coerced, InvalidReason, Record, Value};

use anyhow::{Context, Result};
use futures::{stream::FuturesUnordered, StreamExt};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::diagnostics::Issue;
use crate::schema::parse_schema;
use crate::source::{read_pair, Discovery, PairText};
use crate::transport::Transport;

/// What happened to one schema/data pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairReport {
    pub name: String,
    pub records: usize,
    pub sent: usize,
    pub failed: usize,
    pub schema_issues: usize,
    pub data_issues: usize,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub pairs: Vec<PairReport>,
    /// Pairs that could not be read or whose schema was unusable.
    pub failed_pairs: Vec<String>,
    pub orphans: usize,
}

impl RunReport {
    pub fn records_sent(&self) -> usize {
        self.pairs.iter().map(|p| p.sent).sum()
    }

    pub fn records_failed(&self) -> usize {
        self.pairs.iter().map(|p| p.failed).sum()
    }

    /// True when every discovered pair was processed and every record sent.
    pub fn is_clean(&self) -> bool {
        self.failed_pairs.is_empty() && self.records_failed() == 0
    }
}

fn log_issues(pair: &str, issues: &[Issue]) {
    for issue in issues {
        warn!(pair, kind = issue.kind(), "{}", issue);
    }
}

/// Send every record, keeping at most `concurrency` requests in flight.
/// Returns `(sent, failed)`; failures are logged and never retried.
pub async fn send_all<T: Transport>(
    transport: &T,
    records: &[Record],
    concurrency: usize,
) -> (usize, usize) {
    let limit = concurrency.max(1);
    let mut tasks = FuturesUnordered::new();
    let (mut sent, mut failed) = (0, 0);
    let mut tally = |(idx, res): (usize, Result<()>)| match res {
        Ok(()) => sent += 1,
        Err(e) => {
            error!(record = idx + 1, error = %format!("{e:#}"), "send failed");
            failed += 1;
        }
    };

    for (idx, record) in records.iter().enumerate() {
        tasks.push(async move { (idx, transport.send(record).await) });

        // throttle concurrency
        if tasks.len() >= limit {
            if let Some(res) = tasks.next().await {
                tally(res);
            }
        }
    }

    // drain remaining tasks
    while let Some(res) = tasks.next().await {
        tally(res);
    }

    (sent, failed)
}

/// Parse, decode and send one pair that has already been read.
///
/// Data-quality issues are logged and counted; only a structurally broken
/// schema makes this return an error.
#[instrument(level = "info", skip(text, transport))]
pub async fn process_pair<T: Transport>(
    name: &str,
    text: &PairText,
    transport: &T,
    concurrency: usize,
) -> Result<PairReport> {
    let parsed =
        parse_schema(&text.schema).with_context(|| format!("parsing schema for {name}"))?;
    log_issues(name, &parsed.issues);
    if parsed.schema.has_invalid_widths() {
        warn!(
            pair = name,
            "schema has invalid widths; columns from the first one onward will be null"
        );
    }
    debug!(schema = ?parsed.schema, "schema");

    let decoded = parse_data(&text.data, &parsed.schema);
    log_issues(name, &decoded.issues);
    info!(
        records = decoded.records.len(),
        issues = decoded.issues.len(),
        "decoded"
    );

    let (sent, failed) = send_all(transport, &decoded.records, concurrency).await;
    Ok(PairReport {
        name: name.to_string(),
        records: decoded.records.len(),
        sent,
        failed,
        schema_issues: parsed.issues.len(),
        data_issues: decoded.issues.len(),
    })
}

/// Process every discovered pair in name order.
///
/// Orphans are logged and skipped. A pair that cannot be read or parsed is
/// recorded in `failed_pairs` and the run moves on.
pub async fn process_all<T: Transport>(
    discovery: &Discovery,
    transport: &T,
    concurrency: usize,
) -> RunReport {
    let mut report = RunReport {
        orphans: discovery.orphans(),
        ..Default::default()
    };

    for path in &discovery.orphan_schemas {
        error!(path = %path.display(), "schema file has no matching data file");
    }
    for path in &discovery.orphan_data {
        error!(path = %path.display(), "data file has no matching schema file");
    }

    for pair in &discovery.pairs {
        let text = match read_pair(pair).await {
            Ok(t) => t,
            Err(e) => {
                error!(pair = %pair.name, error = %format!("{e:#}"), "skipping pair");
                report.failed_pairs.push(pair.name.clone());
                continue;
            }
        };

        match process_pair(&pair.name, &text, transport, concurrency).await {
            Ok(pr) => {
                info!(
                    pair = %pr.name,
                    sent = pr.sent,
                    failed = pr.failed,
                    "pair done"
                );
                report.pairs.push(pr);
            }
            Err(e) => {
                error!(pair = %pair.name, error = %format!("{e:#}"), "skipping pair");
                report.failed_pairs.push(pair.name.clone());
            }
        }
    }

    report
}
