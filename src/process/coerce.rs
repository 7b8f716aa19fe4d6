use crate::process::record::{Coerced, InvalidReason, Value};
use crate::schema::DataType;

/// Result of coercing one field: the value, plus any text after a numeric
/// prefix that was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coercion<'a> {
    pub value: Coerced,
    pub ignored: &'a str,
}

/// Convert a trimmed field into its declared type.
///
/// INTEGER and BOOLEAN read a leading base-10 integer (optional sign); text
/// after the digits is returned in `ignored`. No leading digits, or a prefix
/// outside `i64`, is `Invalid(NotAnInteger)`. BOOLEAN maps 0 to `false` and
/// any other integer to `true`. TEXT and unknown tags pass the text through.
pub fn coerce<'a>(raw: &'a str, data_type: &DataType) -> Coercion<'a> {
    let integer = |wrap: fn(i64) -> Value| match parse_integer_prefix(raw) {
        Some((n, rest)) => Coercion {
            value: Coerced::Valid(wrap(n)),
            ignored: rest,
        },
        None => Coercion {
            value: Coerced::Invalid(InvalidReason::NotAnInteger),
            ignored: "",
        },
    };

    match data_type {
        DataType::Integer => integer(Value::Integer),
        DataType::Boolean => integer(|n| Value::Boolean(n != 0)),
        DataType::Text | DataType::Unknown(_) => Coercion {
            value: Coerced::Valid(Value::Text(raw.to_string())),
            ignored: "",
        },
    }
}

/// Split `raw` into a leading `[+-]digits` integer and the rest.
fn parse_integer_prefix(raw: &str) -> Option<(i64, &str)> {
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits = raw[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    let (number, rest) = raw.split_at(sign_len + digits);
    number.parse::<i64>().ok().map(|n| (n, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(raw: &str, data_type: DataType) -> Coerced {
        coerce(raw, &data_type).value
    }

    #[test]
    fn integers() {
        assert_eq!(value("2017", DataType::Integer), Coerced::Valid(Value::Integer(2017)));
        assert_eq!(value("-4", DataType::Integer), Coerced::Valid(Value::Integer(-4)));
        assert_eq!(value("+4", DataType::Integer), Coerced::Valid(Value::Integer(4)));
        assert_eq!(value("007", DataType::Integer), Coerced::Valid(Value::Integer(7)));
    }

    #[test]
    fn leading_digits_are_kept_and_the_rest_reported() {
        let c = coerce("2017a", &DataType::Integer);
        assert_eq!(c.value, Coerced::Valid(Value::Integer(2017)));
        assert_eq!(c.ignored, "a");

        let c = coerce("1.5", &DataType::Integer);
        assert_eq!(c.value, Coerced::Valid(Value::Integer(1)));
        assert_eq!(c.ignored, ".5");

        let c = coerce("1x", &DataType::Boolean);
        assert_eq!(c.value, Coerced::Valid(Value::Boolean(true)));
        assert_eq!(c.ignored, "x");

        assert_eq!(coerce("42", &DataType::Integer).ignored, "");
    }

    #[test]
    fn no_leading_digits_is_invalid_not_zero() {
        for raw in ["", "x", "x12", "-", "+", ".5", "99999999999999999999"] {
            assert_eq!(
                value(raw, DataType::Integer),
                Coerced::Invalid(InvalidReason::NotAnInteger),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn booleans_go_through_integers() {
        assert_eq!(value("0", DataType::Boolean), Coerced::Valid(Value::Boolean(false)));
        assert_eq!(value("1", DataType::Boolean), Coerced::Valid(Value::Boolean(true)));
        assert_eq!(value("-2", DataType::Boolean), Coerced::Valid(Value::Boolean(true)));
        assert_eq!(
            value("Y", DataType::Boolean),
            Coerced::Invalid(InvalidReason::NotAnInteger)
        );
        assert_eq!(
            value("", DataType::Boolean),
            Coerced::Invalid(InvalidReason::NotAnInteger)
        );
    }

    #[test]
    fn text_and_unknown_pass_through() {
        assert_eq!(value("x", DataType::Text), Coerced::Valid(Value::Text("x".into())));
        let c = coerce("2017a", &DataType::Unknown("DATE".into()));
        assert_eq!(c.value, Coerced::Valid(Value::Text("2017a".into())));
        assert_eq!(c.ignored, "");
    }
}
