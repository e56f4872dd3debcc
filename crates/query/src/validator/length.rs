use super::{Span, ValidationError, ValidationErrorKind, ValidationResult};

/// Inclusive range over the character length of a fragment's text
#[derive(Debug, Clone, PartialEq)]
pub struct LengthRange {
    /// Minimum length in characters (inclusive)
    pub min: Option<usize>,
    /// Maximum length in characters (inclusive)
    pub max: Option<usize>,
}

impl LengthRange {
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn exactly(len: usize) -> Self {
        Self {
            min: Some(len),
            max: Some(len),
        }
    }

    pub fn contains(&self, value: usize) -> bool {
        let above_min = self.min.is_none_or(|min| value >= min);
        let below_max = self.max.is_none_or(|max| value <= max);
        above_min && below_max
    }
}

fn invalid(span: Span, value: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::new(
        span,
        ValidationErrorKind::InvalidLengthSpec {
            value: value.to_string(),
            reason: reason.into(),
        },
    )
}

/// Parse a single length such as `120`, `1k` or `1.5k`.
pub fn parse_length_value(s: &str, span: Span) -> ValidationResult<usize> {
    let s = s.trim();

    if s.is_empty() {
        return Err(ValidationError::new(span, ValidationErrorKind::EmptyValue));
    }

    let num_end = s
        .chars()
        .position(|c| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());

    if num_end == 0 {
        return Err(invalid(span, s, "missing numeric value"));
    }

    let num_str = &s[..num_end];
    let num: f64 = num_str
        .parse()
        .map_err(|_| invalid(span, s, format!("invalid number '{}'", num_str)))?;

    let multiplier: f64 = match s[num_end..].trim().to_lowercase().as_str() {
        "" | "c" | "ch" | "chars" => 1.0,
        "k" => 1_000.0,
        unit => {
            return Err(invalid(
                span,
                s,
                format!("unknown unit '{}'. Supported: chars, k", unit),
            ));
        }
    };

    let length = num * multiplier;
    if length.fract() != 0.0 {
        return Err(invalid(span, s, "length must be a whole number of characters"));
    }

    Ok(length as usize)
}

/// Validate a length specification with optional operators.
///
/// Supported formats:
/// - `0` / `=0` - empty text
/// - `>100` - longer than 100 characters
/// - `<20` - shorter than 20 characters
/// - `>=1k` / `<=500` - inclusive bounds
/// - `10..200` - between 10 and 200 characters
/// - `..50` / `1k..` - open ranges
pub fn validate_length(value: String, span: Span) -> ValidationResult<LengthRange> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(span, ValidationErrorKind::EmptyValue));
    }

    if let Some((left, right)) = value.split_once("..") {
        let min = match left.trim() {
            "" => None,
            left => Some(parse_length_value(left, span)?),
        };
        let max = match right.trim() {
            "" => None,
            right => Some(parse_length_value(right, span)?),
        };

        if let (Some(min_val), Some(max_val)) = (min, max) {
            if min_val > max_val {
                return Err(ValidationError::new(
                    span,
                    ValidationErrorKind::InvalidRange {
                        reason: format!(
                            "minimum length ({}) is greater than maximum length ({})",
                            min_val, max_val
                        ),
                    },
                ));
            }
        }
        return Ok(LengthRange { min, max });
    }

    if let Some(rest) = value.strip_prefix(">=") {
        return Ok(LengthRange::at_least(parse_length_value(rest, span)?));
    }

    if let Some(rest) = value.strip_prefix("<=") {
        return Ok(LengthRange::at_most(parse_length_value(rest, span)?));
    }

    if let Some(rest) = value.strip_prefix('>') {
        let len = parse_length_value(rest, span)?;
        return Ok(LengthRange::at_least(len.saturating_add(1)));
    }

    if let Some(rest) = value.strip_prefix('<') {
        let len = parse_length_value(rest, span)?;
        if len == 0 {
            return Err(ValidationError::new(
                span,
                ValidationErrorKind::InvalidRange {
                    reason: "no length is smaller than 0".to_string(),
                },
            ));
        }
        return Ok(LengthRange::at_most(len - 1));
    }

    let exact = value.strip_prefix('=').unwrap_or(value);
    Ok(LengthRange::exactly(parse_length_value(exact, span)?))
}
