// src/diagnostics.rs

use thiserror::Error;

use crate::schema::DataType;

/// A data-quality problem found while parsing a schema or decoding rows.
///
/// Issues never stop parsing; they travel next to the best-effort result so
/// the caller can log or count them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Issue {
    #[error("schema line {line}: width `{token}` of field `{field}` is not a positive integer")]
    MalformedSchemaRow {
        line: usize,
        field: String,
        token: String,
    },

    #[error("schema line {line}: field `{name}` is declared again; the later value wins")]
    DuplicateField { line: usize, name: String },

    #[error("data row {row}: {len} characters, schema needs {required}")]
    TruncatedDataRow {
        row: usize,
        len: usize,
        required: usize,
    },

    #[error("data row {row}: `{raw}` in field `{field}` is not a valid {data_type}")]
    UnparseableTypedValue {
        row: usize,
        field: String,
        data_type: DataType,
        raw: String,
    },

    #[error("data row {row}: kept the leading integer of field `{field}`, ignored `{ignored}`")]
    IgnoredTrailingText {
        row: usize,
        field: String,
        ignored: String,
    },

    #[error("data row {row}: field `{field}` has no known offset (invalid width earlier in schema)")]
    UnlocatableField { row: usize, field: String },
}

impl Issue {
    /// Short machine-friendly tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Issue::MalformedSchemaRow { .. } => "malformed_schema_row",
            Issue::DuplicateField { .. } => "duplicate_field",
            Issue::TruncatedDataRow { .. } => "truncated_data_row",
            Issue::UnparseableTypedValue { .. } => "unparseable_typed_value",
            Issue::IgnoredTrailingText { .. } => "ignored_trailing_text",
            Issue::UnlocatableField { .. } => "unlocatable_field",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let issue = Issue::UnparseableTypedValue {
            row: 3,
            field: "score".into(),
            data_type: DataType::Integer,
            raw: "x".into(),
        };
        assert_eq!(
            issue.to_string(),
            "data row 3: `x` in field `score` is not a valid INTEGER"
        );
        assert_eq!(issue.kind(), "unparseable_typed_value");
    }
}
