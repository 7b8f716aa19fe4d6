pub mod http;

pub use http::{HttpTransport, LogTransport, PayloadTooLarge};

use anyhow::Result;
use std::future::Future;

use crate::process::Record;

/// Somewhere to deliver decoded records, one call per record.
pub trait Transport {
    fn send(&self, record: &Record) -> impl Future<Output = Result<()>> + Send;
}
