//! Schema-driven fixed-width record ingestion.
//!
//! Each `<name>.csv` schema lists `name,width,type` rows; the matching
//! `<name>.txt` data file holds one fixed-width record per line. Records are
//! decoded against the schema and delivered one by one through a
//! [`transport::Transport`].

pub mod config;
pub mod diagnostics;
pub mod process;
pub mod schema;
pub mod source;
pub mod transport;
pub mod utils;
