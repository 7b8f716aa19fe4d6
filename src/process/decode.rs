// src/process/decode.rs

use tracing::{debug, instrument};

use crate::diagnostics::Issue;
use crate::process::coerce::coerce;
use crate::process::record::{Coerced, InvalidReason, Record};
use crate::schema::Schema;
use crate::utils::{data_lines, slice_chars};

/// Records decoded from one data text, plus every issue met on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    pub records: Vec<Record>,
    pub issues: Vec<Issue>,
}

/// Slice each non-empty line of `text` into the columns of `schema`.
///
/// Every line yields exactly one record with one entry per field name. Short
/// lines are clamped: the cursor still advances by each declared width, so
/// fields past the end read as empty. A column with an invalid width, and
/// everything after it, is `Invalid(UnknownOffset)`.
#[instrument(level = "debug", skip_all, fields(text_len = text.len(), columns = schema.len()))]
pub fn parse_data(text: &str, schema: &Schema) -> Decoded {
    let required = schema.total_width();
    let mut records = Vec::new();
    let mut issues = Vec::new();

    for (row, line) in data_lines(text) {
        let len = line.chars().count();
        if len < required {
            issues.push(Issue::TruncatedDataRow { row, len, required });
        }

        let mut record = Record::with_capacity(schema.len());
        // None once an unparseable width has been passed
        let mut cursor = Some(0usize);

        for field in schema.fields() {
            let value = match (cursor, field.width.chars()) {
                (Some(start), Some(width)) => {
                    let raw = slice_chars(line, start, width).trim();
                    cursor = Some(start.saturating_add(width));
                    let coerced = coerce(raw, &field.data_type);
                    if !coerced.value.is_valid() {
                        issues.push(Issue::UnparseableTypedValue {
                            row,
                            field: field.name.clone(),
                            data_type: field.data_type.clone(),
                            raw: raw.to_string(),
                        });
                    } else if !coerced.ignored.is_empty() {
                        issues.push(Issue::IgnoredTrailingText {
                            row,
                            field: field.name.clone(),
                            ignored: coerced.ignored.to_string(),
                        });
                    }
                    coerced.value
                }
                _ => {
                    cursor = None;
                    issues.push(Issue::UnlocatableField {
                        row,
                        field: field.name.clone(),
                    });
                    Coerced::Invalid(InvalidReason::UnknownOffset)
                }
            };
            record.insert(&field.name, value);
        }

        records.push(record);
    }

    debug!(records = records.len(), issues = issues.len(), "Finished decoding");
    Decoded { records, issues }
}
