use logos::{Lexer, Logos};

/// Raw tokens used internally by logos
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\n\f]+")]
enum RawToken {
    #[token("AND")]
    #[token("&&")]
    And,

    #[token("OR")]
    #[token("||")]
    Or,

    #[token("NOT")]
    #[token("!")]
    Not,

    /// Google-style exclusion, only recognised in front of a term
    #[token("-")]
    Minus,

    #[token(":")]
    Colon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r#""([^"\\]|\\.)*""#, quoted_text_inner_string)]
    QuotedText(String),

    #[regex(r#"[^ \t\n\f:"()!&|\-][^ \t\n\f:"()!&|]*"#, |lex| lex.slice().to_string())]
    Text(String),
}

fn quoted_text_inner_string(lex: &mut Lexer<RawToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Value tokens - used after `:` where operators are treated as text
#[derive(Logos, Debug, PartialEq, Clone)]
enum ValueToken {
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    #[regex(r#"[^ \t\n\f"()]+"#)]
    Text,

    #[regex(r"[ \t\n\f]+")]
    Whitespace,
}

/// The public token type
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    And,
    Or,
    Not,
    Minus,
    Colon,
    LParen,
    RParen,
    QuotedText(String),
    Text(String),
    /// Input the lexer could not classify (e.g. a lone `&`)
    Invalid,
}

/// A context-aware query lexer
///
/// After a `:` the next token is lexed as a value, so `loc:a/#b-c` or
/// `len:>100` keep their punctuation.
pub struct QueryLexer<'source> {
    lexer: Lexer<'source, RawToken>,
    after_colon: bool,
    current_span: std::ops::Range<usize>,
}

impl<'source> QueryLexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            lexer: RawToken::lexer(source),
            after_colon: false,
            current_span: 0..0,
        }
    }

    /// Get the span of the last yielded token
    pub fn span(&self) -> std::ops::Range<usize> {
        self.current_span.clone()
    }

    /// Returns an iterator that yields (Result<Token, ()>, Range<usize>)
    pub fn spanned(self) -> SpannedQueryLexer<'source> {
        SpannedQueryLexer { lexer: self }
    }

    fn next_value(&mut self) -> Option<Result<Token, ()>> {
        let mut value_lexer: Lexer<'source, ValueToken> = self.lexer.clone().morph();

        let result = match value_lexer.next()? {
            Ok(ValueToken::Quoted) => {
                let slice = value_lexer.slice();
                self.current_span = value_lexer.span();
                Some(Ok(Token::QuotedText(slice[1..slice.len() - 1].to_string())))
            }
            Ok(ValueToken::Text) => {
                self.current_span = value_lexer.span();
                Some(Ok(Token::Text(value_lexer.slice().to_string())))
            }
            Ok(ValueToken::Whitespace) => {
                // No value after colon, continue in normal mode
                self.lexer = value_lexer.morph();
                return self.next();
            }
            Err(_) => {
                self.current_span = value_lexer.span();
                Some(Err(()))
            }
        };
        self.lexer = value_lexer.morph();
        result
    }
}

impl<'source> Iterator for QueryLexer<'source> {
    type Item = Result<Token, ()>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.after_colon {
            self.after_colon = false;
            return self.next_value();
        }

        let result = self.lexer.next()?;
        self.current_span = self.lexer.span();

        let token = match result {
            Ok(RawToken::Colon) => {
                self.after_colon = true;
                Token::Colon
            }
            Ok(RawToken::And) => Token::And,
            Ok(RawToken::Or) => Token::Or,
            Ok(RawToken::Not) => Token::Not,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Ok(RawToken::QuotedText(s)) => Token::QuotedText(s),
            Ok(RawToken::Text(s)) => Token::Text(s),
            Err(_) => return Some(Err(())),
        };
        Some(Ok(token))
    }
}

/// Iterator adapter that yields tokens with their spans
pub struct SpannedQueryLexer<'source> {
    lexer: QueryLexer<'source>,
}

impl<'source> Iterator for SpannedQueryLexer<'source> {
    type Item = (Result<Token, ()>, std::ops::Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next()?;
        let span = self.lexer.span();
        Some((token, span))
    }
}
