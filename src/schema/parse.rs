// src/schema/parse.rs

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use super::types::{DataType, FieldSpec, Schema, Width};
use crate::diagnostics::Issue;
use crate::utils::non_empty_lines;

/// Structural problems that make a schema text unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema line {line}: expected `name,width,type`, found {found} token(s)")]
    MissingTokens { line: usize, found: usize },

    #[error("schema line {line}: field name is empty")]
    EmptyName { line: usize },
}

/// A parsed schema plus whatever it found wrong along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchema {
    pub schema: Schema,
    pub issues: Vec<Issue>,
}

/// Parse `name,width,type` rows into an ordered `Schema`.
///
/// Empty rows are skipped. A bad width keeps the field with `Width::Invalid`
/// and reports `MalformedSchemaRow`; only a row without three tokens or with
/// an empty name fails the whole schema.
#[instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn parse_schema(text: &str) -> Result<ParsedSchema, SchemaError> {
    let mut fields = Vec::new();
    let mut issues = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (line, row) in non_empty_lines(text) {
        let tokens: Vec<&str> = row.split(',').collect();
        let &[name, width, tag, ..] = tokens.as_slice() else {
            return Err(SchemaError::MissingTokens {
                line,
                found: tokens.len(),
            });
        };
        if name.is_empty() {
            return Err(SchemaError::EmptyName { line });
        }

        let width = match width.trim().parse::<usize>() {
            Ok(n) if n > 0 => Width::Chars(n),
            _ => {
                issues.push(Issue::MalformedSchemaRow {
                    line,
                    field: name.to_string(),
                    token: width.to_string(),
                });
                Width::Invalid(width.to_string())
            }
        };

        if !seen.insert(name.to_string()) {
            issues.push(Issue::DuplicateField {
                line,
                name: name.to_string(),
            });
        }

        let data_type = DataType::from_tag(tag);
        trace!(line, name, width = ?width, data_type = %data_type, "Parsed field");
        fields.push(FieldSpec {
            name: name.to_string(),
            width,
            data_type,
        });
    }

    debug!(fields = fields.len(), issues = issues.len(), "Finished schema parsing");
    Ok(ParsedSchema {
        schema: Schema::new(fields),
        issues,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let parsed = parse_schema("measure_id,8,TEXT\nis_required,1,BOOLEAN\nscore,3,INTEGER\n")
            .unwrap();
        assert!(parsed.issues.is_empty());
        assert_eq!(
            parsed.schema.fields(),
            &[
                FieldSpec::new("measure_id", 8, DataType::Text),
                FieldSpec::new("is_required", 1, DataType::Boolean),
                FieldSpec::new("score", 3, DataType::Integer),
            ]
        );
        assert_eq!(parsed.schema.total_width(), 12);
    }

    #[test]
    fn blank_rows_do_not_become_fields() {
        let parsed = parse_schema("\na,2,TEXT\n\n\nb,2,TEXT\n\n").unwrap();
        assert_eq!(parsed.schema.len(), 2);
        assert_eq!(parse_schema("").unwrap().schema.len(), 0);
    }

    #[test]
    fn crlf_rows_keep_clean_type_tags() {
        let parsed = parse_schema("a,2,INTEGER\r\nb,1,BOOLEAN\r\n").unwrap();
        assert_eq!(parsed.schema.fields()[0].data_type, DataType::Integer);
        assert_eq!(parsed.schema.fields()[1].data_type, DataType::Boolean);
    }

    #[test]
    fn bad_width_is_kept_and_reported() {
        let parsed = parse_schema("a,2,TEXT\nb,wide,INTEGER\nc,0,TEXT\nd,1,TEXT\n").unwrap();
        assert_eq!(parsed.schema.len(), 4);
        assert_eq!(parsed.schema.fields()[1].width, Width::Invalid("wide".into()));
        assert_eq!(parsed.schema.fields()[2].width, Width::Invalid("0".into()));
        assert_eq!(
            parsed.issues,
            vec![
                Issue::MalformedSchemaRow {
                    line: 2,
                    field: "b".into(),
                    token: "wide".into()
                },
                Issue::MalformedSchemaRow {
                    line: 3,
                    field: "c".into(),
                    token: "0".into()
                },
            ]
        );
    }

    #[test]
    fn width_token_tolerates_padding() {
        let parsed = parse_schema("a, 4 ,TEXT\n").unwrap();
        assert_eq!(parsed.schema.fields()[0].width, Width::Chars(4));
    }

    #[test]
    fn unknown_tags_and_names_are_not_normalised() {
        let parsed = parse_schema(" padded ,3,DATE\n").unwrap();
        let field = &parsed.schema.fields()[0];
        assert_eq!(field.name, " padded ");
        assert_eq!(field.data_type, DataType::Unknown("DATE".into()));
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let parsed = parse_schema("a,2,TEXT,trailing,stuff\n").unwrap();
        assert_eq!(parsed.schema.fields(), &[FieldSpec::new("a", 2, DataType::Text)]);
    }

    #[test]
    fn duplicate_names_are_flagged_not_dropped() {
        let parsed = parse_schema("a,1,TEXT\nb,1,TEXT\na,1,INTEGER\n").unwrap();
        assert_eq!(parsed.schema.len(), 3);
        assert_eq!(
            parsed.issues,
            vec![Issue::DuplicateField {
                line: 3,
                name: "a".into()
            }]
        );
    }

    #[test]
    fn short_rows_fail_the_schema() {
        assert_eq!(
            parse_schema("a,2,TEXT\nb,2\n"),
            Err(SchemaError::MissingTokens { line: 2, found: 2 })
        );
        assert_eq!(
            parse_schema("   \n"),
            Err(SchemaError::MissingTokens { line: 1, found: 1 })
        );
        assert_eq!(
            parse_schema(",2,TEXT\n"),
            Err(SchemaError::EmptyName { line: 1 })
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "x,1,TEXT\ny,bad,INTEGER\n";
        assert_eq!(parse_schema(text), parse_schema(text));
    }
}
