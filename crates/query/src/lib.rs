//! Query language for documentation search.
//!
//! ```text
//! field AND cat:method
//! title:"vector potential" OR loc:analytic/*
//! -cat:page len:>100
//! ```

pub mod lexer;
pub mod parser;
pub mod validator;

pub use lexer::{QueryLexer, Token};
pub use parser::{
    ParsedQuery, ParsedTerm, ParsedTermValue, Span, Spanned, describe_parse_errors, parse_query,
    parser,
};
pub use validator::{
    CATEGORY_TAGS, FIELD_DEFINITIONS, FieldDef, FieldKind, LengthRange, Query, Term,
    ValidationError, ValidationErrorKind, ValidationResult, validate_query,
};
