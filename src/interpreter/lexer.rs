use logos::Logos;

use crate::error::ParseError;

/// Raw intra-line tokens produced by the generated lexer.
///
/// The line-driven [`lex`] pass wraps these with the structural
/// `Indent`/`Dedent`/`Newline`/`Eof` tokens that the generated lexer cannot
/// see, since indentation is a property of whole lines.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\f]+")]
enum RawToken {
    /// Numeric literal tokens: digits with at most one decimal point, no
    /// sign and no exponent (`-` is a parser-level operator).
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_numeric)]
    #[regex(r"\.[0-9]+", parse_numeric)]
    Number(f64),
    /// String literal tokens, single- or double-quoted. A backslash escapes
    /// whatever character follows it. An unterminated quote consumes to the
    /// end of the line.
    #[regex(r#""(\\.|[^"\\])*"?"#, |lex| unescape(lex.slice(), '"'))]
    #[regex(r#"'(\\.|[^'\\])*'?"#, |lex| unescape(lex.slice(), '\''))]
    Str(String),
    /// Identifier tokens. Any Unicode letter or underscore starts an
    /// identifier; letters, digits and underscores continue it, so accented
    /// Vietnamese names like `tổng_cộng` are ordinary identifiers.
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `:`
    #[token(":")]
    Colon,
    /// `%`
    #[token("%")]
    Percent,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
}

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Besides the intra-line tokens this includes the indentation structure:
/// `Indent`/`Dedent` pairs around each nested block, a `Newline` after every
/// non-blank line, and a final `Eof`.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal.
    Number(f64),
    /// A string literal with escapes resolved.
    Str(String),
    /// An identifier. Keywords are identifiers too; statement dispatch
    /// happens in the parser, on the identifier's text.
    Identifier(String),
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `=`
    Equals,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `:`
    Colon,
    /// `%`
    Percent,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// Any other non-space character, kept as a permissive one-off operator
    /// token rather than a lex error.
    Unknown(String),
    /// Start of an indented block.
    Indent,
    /// End of an indented block.
    Dedent,
    /// End of a non-blank source line.
    Newline,
    /// End of input.
    Eof,
}

impl Token {
    fn from_raw(raw: RawToken) -> Self {
        match raw {
            RawToken::Number(n) => Self::Number(n),
            RawToken::Str(s) => Self::Str(s),
            RawToken::Identifier(s) => Self::Identifier(s),
            RawToken::EqualEqual => Self::EqualEqual,
            RawToken::BangEqual => Self::BangEqual,
            RawToken::LessEqual => Self::LessEqual,
            RawToken::GreaterEqual => Self::GreaterEqual,
            RawToken::Comma => Self::Comma,
            RawToken::LParen => Self::LParen,
            RawToken::RParen => Self::RParen,
            RawToken::Equals => Self::Equals,
            RawToken::Plus => Self::Plus,
            RawToken::Minus => Self::Minus,
            RawToken::Star => Self::Star,
            RawToken::Slash => Self::Slash,
            RawToken::Less => Self::Less,
            RawToken::Greater => Self::Greater,
            RawToken::Colon => Self::Colon,
            RawToken::Percent => Self::Percent,
            RawToken::LBracket => Self::LBracket,
            RawToken::RBracket => Self::RBracket,
            RawToken::LBrace => Self::LBrace,
            RawToken::RBrace => Self::RBrace,
        }
    }
}

/// Tokenizes a whole source text into `(Token, line)` pairs.
///
/// The source is processed line by line (line terminators normalized first):
/// everything from the first `#` to the end of a line is stripped as a
/// comment, blank lines contribute no tokens at all, and leading whitespace
/// (tabs expanded to 4 columns) drives the indentation stack. Every non-blank
/// line ends with a `Newline` token; at end of input all open indentation
/// levels are closed with `Dedent`s, followed by a single `Eof`.
///
/// # Errors
/// Returns [`ParseError::InvalidIndentation`] when a line dedents to a width
/// that matches no open indentation level. Individually unrecognized
/// characters are not errors; they become [`Token::Unknown`].
pub fn lex(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let source = source.replace("\r\n", "\n").replace('\r', "\n");
    let mut tokens = Vec::new();
    let mut indent_stack = vec![0usize];
    let mut last_line = 1;

    for (index, raw_line) in source.split('\n').enumerate() {
        let lineno = index + 1;
        last_line = lineno;

        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let indent = indent_width(line);
        if indent > *indent_stack.last().unwrap_or(&0) {
            indent_stack.push(indent);
            tokens.push((Token::Indent, lineno));
        } else {
            while indent < *indent_stack.last().unwrap_or(&0) {
                indent_stack.pop();
                tokens.push((Token::Dedent, lineno));
            }
            if indent != *indent_stack.last().unwrap_or(&0) {
                return Err(ParseError::InvalidIndentation { line: lineno });
            }
        }

        let mut lexer = RawToken::lexer(line);
        while let Some(item) = lexer.next() {
            match item {
                Ok(raw) => tokens.push((Token::from_raw(raw), lineno)),
                Err(()) => tokens.push((Token::Unknown(lexer.slice().to_string()), lineno)),
            }
        }
        tokens.push((Token::Newline, lineno));
    }

    while indent_stack.len() > 1 {
        indent_stack.pop();
        tokens.push((Token::Dedent, last_line));
    }
    tokens.push((Token::Eof, last_line));
    Ok(tokens)
}

/// Computes the leading-whitespace width of a line, with tabs counted as 4
/// columns.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}

/// Parses a numeric literal from the current token slice.
fn parse_numeric(lex: &logos::Lexer<RawToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Resolves the quotes and escapes of a string literal slice. A backslash
/// makes the following character literal; a missing closing quote simply
/// ends the string at the end of the line.
fn unescape(slice: &str, quote: char) -> String {
    let mut out = String::new();
    let mut chars = slice.chars();
    chars.next(); // opening quote
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if ch == quote {
            break;
        } else {
            out.push(ch);
        }
    }
    out
}
