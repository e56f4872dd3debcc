use chumsky::{input::ValueInput, prelude::*};

use crate::{QueryLexer, lexer::Token};

pub type Span = SimpleSpan;
pub type Spanned<T> = (T, Span);

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedQuery {
    /// A single search term: `field:value` or just `value`
    Term(ParsedTerm),

    /// Logical And
    And(Vec<Spanned<ParsedQuery>>),

    /// Logical Or
    Or(Vec<Spanned<ParsedQuery>>),

    /// Logical Not (`NOT`, `!` or a leading `-`)
    Not(Box<Spanned<ParsedQuery>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTerm {
    pub field: Option<Spanned<String>>,
    pub value: Spanned<ParsedTermValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTermValue {
    /// Plain text e.g. `tokamak`
    Text(String),

    /// Quoted text (Not includes quotes) e.g. `vector \"potential\"`
    QuotedText(String),
}

impl ParsedTermValue {
    pub fn raw_str(&self) -> &str {
        match self {
            ParsedTermValue::Text(s) => s,
            ParsedTermValue::QuotedText(s) => s,
        }
    }

    /// The value with `\"` unescaped for quoted text.
    pub fn unescaped(&self) -> String {
        match self {
            ParsedTermValue::Text(s) => s.clone(),
            ParsedTermValue::QuotedText(s) => s.replace(r#"\""#, r#"""#),
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, ParsedTermValue::QuotedText(_))
    }
}

/// Parser for Lucene/Google-style queries
///
/// Grammar(lower to higher priority):
/// ```text
/// query       := or_expr
/// or_expr     := and_expr (OR and_expr)*
/// and_expr    := not_expr ((AND)? not_expr)*
/// not_expr    := (NOT | '-')* atom
/// atom        := term | '(' query ')'
/// term        := (field ':')? value
/// value       := Text | QuotedText
/// ```
pub fn parser<'tokens, I>()
-> impl Parser<'tokens, I, Spanned<ParsedQuery>, extra::Err<Rich<'tokens, Token>>>
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    recursive(|query| {
        let field_with_span =
            select! { Token::Text(s) => s }.map_with(|s, e| (s, e.span()));

        let value_with_span = select! {
            Token::Text(s) => ParsedTermValue::Text(s),
            Token::QuotedText(s) => ParsedTermValue::QuotedText(s),
        }
        .map_with(|v, e| (v, e.span()));

        let term = field_with_span
            .then(just(Token::Colon).ignore_then(value_with_span).or_not())
            .map(|(field_spanned, value_opt)| match value_opt {
                Some(value) => ParsedTerm {
                    field: Some(field_spanned),
                    value,
                },
                None => {
                    let (text, span) = field_spanned;
                    ParsedTerm {
                        field: None,
                        value: (ParsedTermValue::Text(text), span),
                    }
                }
            })
            .or(
                select! { Token::QuotedText(s) => ParsedTermValue::QuotedText(s) }
                    .map_with(|v, e| ParsedTerm {
                        field: None,
                        value: (v, e.span()),
                    }),
            )
            .map(ParsedQuery::Term)
            .map_with(|q, e| (q, e.span()));

        let atom = term.or(query
            .clone()
            .delimited_by(just(Token::LParen), just(Token::RParen)));

        let negation = choice((just(Token::Not), just(Token::Minus)));

        let not_expr = negation.map_with(|_, e| e.span()).repeated().foldr(
            atom,
            |not_span: SimpleSpan, (q, q_span): Spanned<ParsedQuery>| {
                let combined_span = (not_span.start..q_span.end).into();
                (ParsedQuery::Not(Box::new((q, q_span))), combined_span)
            },
        );

        let and_expr = not_expr.clone().foldl(
            choice((
                just(Token::And).ignore_then(not_expr.clone()),
                not_expr.clone(),
            ))
            .repeated(),
            |lhs: Spanned<ParsedQuery>, rhs: Spanned<ParsedQuery>| {
                let span = (lhs.1.start..rhs.1.end).into();
                match lhs {
                    (ParsedQuery::And(mut v), _) => {
                        v.push(rhs);
                        (ParsedQuery::And(v), span)
                    }
                    _ => (ParsedQuery::And(vec![lhs, rhs]), span),
                }
            },
        );

        and_expr.clone().foldl(
            just(Token::Or).ignore_then(and_expr).repeated(),
            |lhs: Spanned<ParsedQuery>, rhs: Spanned<ParsedQuery>| {
                let span = (lhs.1.start..rhs.1.end).into();
                match lhs {
                    (ParsedQuery::Or(mut v), _) => {
                        v.push(rhs);
                        (ParsedQuery::Or(v), span)
                    }
                    _ => (ParsedQuery::Or(vec![lhs, rhs]), span),
                }
            },
        )
    })
}

/// Helper function to parse a query string and return the result
///
/// Lexer errors become [`Token::Invalid`] so they surface as parse errors
/// with a span instead of aborting.
pub fn parse_query(input: &str) -> Result<Spanned<ParsedQuery>, Vec<Rich<'_, Token>>> {
    use chumsky::input::Stream;

    let token_iter = QueryLexer::new(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Invalid), SimpleSpan::from(span)));

    let token_stream = Stream::from_iter(token_iter)
        .map((0..input.len()).into(), |(t, s): (_, _)| (t, s));

    parser().parse(token_stream).into_result()
}

/// Render parser errors as a single human readable line
pub fn describe_parse_errors(errors: &[Rich<'_, Token>]) -> String {
    errors
        .iter()
        .map(|e| {
            let span = e.span();
            match e.found() {
                Some(Token::Invalid) => {
                    format!("unrecognised input at {}..{}", span.start, span.end)
                }
                Some(token) => {
                    format!("unexpected {:?} at {}..{}", token, span.start, span.end)
                }
                None => format!("unexpected end of query at {}", span.start),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
