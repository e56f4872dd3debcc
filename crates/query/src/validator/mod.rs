mod length;

use crate::parser::{ParsedQuery, ParsedTerm, Span, Spanned};
pub use length::LengthRange;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Category tags a documentation index may carry
pub const CATEGORY_TAGS: &[&str] = &[
    "page", "section", "module", "method", "function", "constant", "type", "macro",
];

#[derive(Debug)]
pub enum Query {
    Term(Term),
    And(Vec<Query>),
    Or(Vec<Query>),
    Not(Box<Query>),
}

impl Query {
    /// Visit every term together with whether it sits under an odd number
    /// of negations.
    pub fn walk_terms<'a>(&'a self, f: &mut impl FnMut(&'a Term, bool)) {
        self.walk_terms_inner(false, f);
    }

    fn walk_terms_inner<'a>(&'a self, negated: bool, f: &mut impl FnMut(&'a Term, bool)) {
        match self {
            Query::Term(term) => f(term, negated),
            Query::And(items) | Query::Or(items) => {
                for item in items {
                    item.walk_terms_inner(negated, f);
                }
            }
            Query::Not(inner) => inner.walk_terms_inner(!negated, f),
        }
    }
}

#[derive(Debug)]
pub enum Term {
    /// A keyword matched through the full-text index
    KeyWord(String),
    /// Case-insensitive substring of the fragment title
    Title(String),
    /// Case-insensitive substring of the page title
    Page(String),
    /// Case-insensitive substring of the fragment text
    Text(String),
    /// Exact category tag, lower-cased
    Category(String),
    /// Glob pattern on the location (e.g. `analytic/*`)
    Location(glob::Pattern),
    /// Regular expression on title or text
    Regex(Regex),
    /// Character length range of the text
    Length(LengthRange),
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub span: Span,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(span: Span, kind: ValidationErrorKind) -> Self {
        Self { span, kind }
    }

    /// Get the byte range of the error in the original input
    pub fn range(&self) -> std::ops::Range<usize> {
        self.span.start..self.span.end
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (at position {}..{})",
            self.kind, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    UnknownField { field: String },
    InvalidRegex { pattern: String, reason: String },
    InvalidGlob { pattern: String, reason: String },
    InvalidCategory { value: String },
    InvalidLengthSpec { value: String, reason: String },
    EmptyValue,
    InvalidRange { reason: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::UnknownField { field } => {
                write!(f, "unknown field '{}'", field)
            }
            ValidationErrorKind::InvalidRegex { pattern, reason } => {
                write!(f, "invalid regex '{}': {}", pattern, reason)
            }
            ValidationErrorKind::InvalidGlob { pattern, reason } => {
                write!(f, "invalid glob '{}': {}", pattern, reason)
            }
            ValidationErrorKind::InvalidCategory { value } => {
                write!(
                    f,
                    "invalid category '{}'. Expected one of: {}",
                    value,
                    CATEGORY_TAGS.join(", ")
                )
            }
            ValidationErrorKind::InvalidLengthSpec { value, reason } => {
                write!(f, "invalid length '{}': {}", value, reason)
            }
            ValidationErrorKind::EmptyValue => write!(f, "empty value"),
            ValidationErrorKind::InvalidRange { reason } => {
                write!(f, "invalid range: {}", reason)
            }
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a parsed query and convert it to a semantic query
pub fn validate_query(query: &Spanned<ParsedQuery>) -> ValidationResult<Query> {
    let (parsed, _span) = query;
    match parsed {
        ParsedQuery::Term(term) => validate_term(term).map(Query::Term),
        ParsedQuery::And(items) => items
            .iter()
            .map(validate_query)
            .collect::<Result<Vec<_>, _>>()
            .map(Query::And),
        ParsedQuery::Or(items) => items
            .iter()
            .map(validate_query)
            .collect::<Result<Vec<_>, _>>()
            .map(Query::Or),
        ParsedQuery::Not(inner) => validate_query(inner).map(|q| Query::Not(Box::new(q))),
    }
}

pub struct FieldDef {
    pub kind: FieldKind,
    pub aliases: &'static [&'static str],
}

impl FieldDef {
    /// Find a field definition by any of its aliases
    pub fn find_by_alias(name: &str) -> Option<&'static FieldDef> {
        let name_lower = name.to_lowercase();
        FIELD_DEFINITIONS
            .iter()
            .find(|def| def.aliases.iter().any(|&a| a == name_lower))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    KeyWord,
    Title,
    Page,
    Text,
    Category,
    Location,
    Regex,
    Length,
}

impl FieldKind {
    /// Parse a value string into a Term based on the field kind
    pub fn parse_value(&self, value: String, span: Span) -> ValidationResult<Term> {
        match self {
            FieldKind::KeyWord => Ok(Term::KeyWord(value)),
            FieldKind::Title => Ok(Term::Title(value.to_lowercase())),
            FieldKind::Page => Ok(Term::Page(value.to_lowercase())),
            FieldKind::Text => Ok(Term::Text(value.to_lowercase())),
            FieldKind::Category => validate_category(value, span).map(Term::Category),
            FieldKind::Location => validate_glob(value, span).map(Term::Location),
            FieldKind::Regex => validate_regex(value, span).map(Term::Regex),
            FieldKind::Length => length::validate_length(value, span).map(Term::Length),
        }
    }
}

pub static FIELD_DEFINITIONS: &[FieldDef] = &[
    FieldDef {
        kind: FieldKind::KeyWord,
        aliases: &["kw", "keyword"],
    },
    FieldDef {
        kind: FieldKind::Title,
        aliases: &["t", "title"],
    },
    FieldDef {
        kind: FieldKind::Page,
        aliases: &["p", "page"],
    },
    FieldDef {
        kind: FieldKind::Text,
        aliases: &["text", "body"],
    },
    FieldDef {
        kind: FieldKind::Category,
        aliases: &["cat", "category", "kind"],
    },
    FieldDef {
        kind: FieldKind::Location,
        aliases: &["loc", "location", "in"],
    },
    FieldDef {
        kind: FieldKind::Regex,
        aliases: &["r", "re", "regex"],
    },
    FieldDef {
        kind: FieldKind::Length,
        aliases: &["len", "length"],
    },
];

/// Validate a parsed term and convert it to a semantic term
fn validate_term(term: &ParsedTerm) -> ValidationResult<Term> {
    let (value, value_span) = &term.value;
    let value_string = value.unescaped();

    if value_string.is_empty() {
        return Err(ValidationError::new(
            *value_span,
            ValidationErrorKind::EmptyValue,
        ));
    }

    match &term.field {
        None => Ok(Term::KeyWord(value_string)),
        Some((field, field_span)) => match FieldDef::find_by_alias(field) {
            Some(def) => def.kind.parse_value(value_string, *value_span),
            None => Err(ValidationError::new(
                *field_span,
                ValidationErrorKind::UnknownField {
                    field: field.clone(),
                },
            )),
        },
    }
}

fn validate_category(value: String, span: Span) -> ValidationResult<String> {
    let tag = value.to_lowercase();
    if CATEGORY_TAGS.contains(&tag.as_str()) {
        Ok(tag)
    } else {
        Err(ValidationError::new(
            span,
            ValidationErrorKind::InvalidCategory { value },
        ))
    }
}

fn validate_glob(pattern: String, span: Span) -> ValidationResult<glob::Pattern> {
    glob::Pattern::new(&pattern).map_err(|e| {
        ValidationError::new(
            span,
            ValidationErrorKind::InvalidGlob {
                pattern: pattern.clone(),
                reason: e.to_string(),
            },
        )
    })
}

fn validate_regex(pattern: String, span: Span) -> ValidationResult<Regex> {
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            ValidationError::new(
                span,
                ValidationErrorKind::InvalidRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                },
            )
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse_query;
    use rstest::rstest;

    // Helper function
    fn validate(input: &str) -> ValidationResult<Query> {
        let parsed = parse_query(input).expect("Parse failed");
        validate_query(&parsed)
    }

    // Helper to extract error kind
    fn validate_err(input: &str) -> ValidationErrorKind {
        validate(input).unwrap_err().kind
    }

    // ==================== Basic Term Tests ====================

    #[test]
    fn test_bare_keyword() {
        let query = validate("tokamak").unwrap();
        assert!(matches!(query, Query::Term(Term::KeyWord(k)) if k == "tokamak"));
    }

    #[test]
    fn test_quoted_keyword() {
        let query = validate(r#""magnetic axis""#).unwrap();
        assert!(matches!(query, Query::Term(Term::KeyWord(k)) if k == "magnetic axis"));
    }

    #[test]
    fn test_title_is_lowercased() {
        let query = validate("title:Solov").unwrap();
        assert!(matches!(query, Query::Term(Term::Title(t)) if t == "solov"));
    }

    // ==================== Field Alias Tests ====================

    #[rstest]
    #[case("kw:field")]
    #[case("keyword:field")]
    fn test_keyword_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::KeyWord(k)) if k == "field"));
    }

    #[rstest]
    #[case("p:analytic")]
    #[case("page:analytic")]
    fn test_page_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Page(p)) if p == "analytic"));
    }

    #[rstest]
    #[case("text:sin")]
    #[case("body:sin")]
    fn test_text_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Text(t)) if t == "sin"));
    }

    #[rstest]
    #[case("cat:module")]
    #[case("category:module")]
    #[case("kind:MODULE")]
    fn test_category_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Category(c)) if c == "module"));
    }

    #[rstest]
    #[case("loc:analytic/*")]
    #[case("location:analytic/*")]
    #[case("in:analytic/*")]
    fn test_location_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        let Query::Term(Term::Location(pattern)) = query else {
            panic!("Expected location term");
        };
        assert!(pattern.matches("analytic/#ElectromagneticFields.ABC"));
    }

    #[rstest]
    #[case("r:^Axis")]
    #[case("re:^Axis")]
    #[case("regex:^Axis")]
    fn test_regex_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Regex(_))));
    }

    #[rstest]
    #[case("len:>10")]
    #[case("length:>10")]
    fn test_length_aliases(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Length(r)) if r.min == Some(11)));
    }

    // ==================== Case Insensitivity Tests ====================

    #[rstest]
    #[case("CAT:section")]
    #[case("Cat:section")]
    #[case("cAt:Section")]
    fn test_field_case_insensitive(#[case] input: &str) {
        let query = validate(input).unwrap();
        assert!(matches!(query, Query::Term(Term::Category(_))));
    }

    #[test]
    fn test_regex_is_case_insensitive() {
        let Query::Term(Term::Regex(re)) = validate(r"regex:^elec\w+fields").unwrap() else {
            panic!("Expected regex term");
        };
        assert!(re.is_match("ElectromagneticFields.ABC"));
        assert!(!re.is_match("Analytic Fields"));
    }

    // ==================== Validation Errors ====================

    #[test]
    fn test_invalid_regex() {
        let err = validate_err(r"regex:[invalid");
        assert!(matches!(err, ValidationErrorKind::InvalidRegex { .. }));
    }

    #[test]
    fn test_invalid_regex_unclosed_group() {
        let err = validate_err(r#"regex:"(unclosed""#);
        assert!(matches!(err, ValidationErrorKind::InvalidRegex { .. }));
    }

    #[test]
    fn test_invalid_glob() {
        let err = validate_err("loc:analytic/[");
        assert!(matches!(err, ValidationErrorKind::InvalidGlob { .. }));
    }

    #[test]
    fn test_invalid_category() {
        let err = validate_err("cat:widget");
        assert!(
            matches!(err, ValidationErrorKind::InvalidCategory { value } if value == "widget")
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = validate_err("author:someone");
        assert!(
            matches!(err, ValidationErrorKind::UnknownField { field } if field == "author")
        );
    }

    #[test]
    fn test_unknown_field_span() {
        let err = validate("tokamak author:someone").unwrap_err();
        assert_eq!(err.range(), 8..14);
    }

    #[test]
    fn test_empty_value() {
        let err = validate_err(r#"title:"""#);
        assert!(matches!(err, ValidationErrorKind::EmptyValue));
    }

    // ==================== Compound Query Tests ====================

    #[test]
    fn test_and_query() {
        let query = validate("vector AND potential").unwrap();
        let Query::And(items) = query else {
            panic!("Expected AND query");
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Query::Term(Term::KeyWord(k)) if k == "vector"));
        assert!(matches!(&items[1], Query::Term(Term::KeyWord(k)) if k == "potential"));
    }

    #[test]
    fn test_minus_is_not() {
        let query = validate("-cat:page").unwrap();
        let Query::Not(inner) = query else {
            panic!("Expected NOT query");
        };
        assert!(matches!(*inner, Query::Term(Term::Category(c)) if c == "page"));
    }

    #[test]
    fn test_complex_query() {
        let query =
            validate("loc:analytic/* AND (cat:module OR cat:function) AND NOT len:0").unwrap();
        let Query::And(items) = query else {
            panic!("Expected complex AND query");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], Query::Term(Term::Location(_))));
        assert!(matches!(&items[1], Query::Or(_)));
        assert!(matches!(&items[2], Query::Not(_)));
    }

    #[test]
    fn test_walk_terms_tracks_negation() {
        let query = validate("tokamak NOT (cartesian OR -toroidal)").unwrap();
        let mut seen = Vec::new();
        query.walk_terms(&mut |term, negated| {
            if let Term::KeyWord(k) = term {
                seen.push((k.clone(), negated));
            }
        });
        assert_eq!(seen, vec![
            ("tokamak".to_string(), false),
            ("cartesian".to_string(), true),
            ("toroidal".to_string(), false),
        ]);
    }

    // ==================== Field Definition Tests ====================

    #[test]
    fn test_find_by_alias() {
        assert_eq!(FieldDef::find_by_alias("loc").unwrap().kind, FieldKind::Location);
        assert!(FieldDef::find_by_alias("nonexistent").is_none());
    }

    #[test]
    fn test_aliases_are_unique() {
        let mut all: Vec<&str> = FIELD_DEFINITIONS
            .iter()
            .flat_map(|def| def.aliases.iter().copied())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total);
    }

    // ==================== ValidationError Tests ====================

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(
            Span {
                start: 5,
                end: 10,
                context: (),
            },
            ValidationErrorKind::UnknownField {
                field: "foo".into(),
            },
        );
        let display = format!("{}", err);
        assert!(display.contains("unknown field 'foo'"));
        assert!(display.contains("5..10"));
    }

    #[rstest]
    #[case(ValidationErrorKind::UnknownField { field: "x".into() }, "unknown field")]
    #[case(ValidationErrorKind::InvalidRegex { pattern: "[".into(), reason: "err".into() }, "invalid regex")]
    #[case(ValidationErrorKind::InvalidGlob { pattern: "[".into(), reason: "err".into() }, "invalid glob")]
    #[case(ValidationErrorKind::InvalidCategory { value: "x".into() }, "expected one of: page")]
    #[case(ValidationErrorKind::InvalidLengthSpec { value: "x".into(), reason: "err".into() }, "invalid length")]
    #[case(ValidationErrorKind::EmptyValue, "empty value")]
    #[case(ValidationErrorKind::InvalidRange { reason: "err".into() }, "invalid range")]
    fn test_error_kind_display(#[case] kind: ValidationErrorKind, #[case] expected_substr: &str) {
        let display = format!("{}", kind).to_lowercase();
        assert!(
            display.contains(expected_substr),
            "Expected '{}' to contain '{}'",
            display,
            expected_substr
        );
    }
}
