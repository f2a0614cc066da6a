use std::iter::Peekable;

use crate::{error::ParseError, interpreter::lexer::Token, interpreter::parser::core::ParseResult};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals and call argument lists. It
/// repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> Result<Vec<T>, ParseError>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.peek() {
            Some((Token::Comma, _)) => {
                tokens.next();
            },
            Some((tok, _)) if tok == closing => {
                tokens.next();
                break;
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {tok:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be `Token::Identifier`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(s), _)) => Ok(s.clone()),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected identifier, found {tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Peeks for a specific identifier keyword without consuming it.
///
/// Returns the keyword's line when the next token is an identifier with the
/// given text, `None` otherwise. Keywords are ordinary identifiers to the
/// lexer; the parser gives them meaning by position.
pub(in crate::interpreter::parser) fn peek_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                          keyword: &str)
                                                          -> Option<usize>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Identifier(name), line)) if name.as_str() == keyword => Some(*line),
        _ => None,
    }
}

/// Consumes a specific identifier keyword, returning whether it was present.
pub(in crate::interpreter::parser) fn accept_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                            keyword: &str)
                                                            -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if peek_keyword(tokens, keyword).is_some() {
        tokens.next();
        return true;
    }
    false
}

/// Consumes one expected token, returning whether it was present.
pub(in crate::interpreter::parser) fn accept<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((tok, _)) = tokens.peek()
       && tok == expected
    {
        tokens.next();
        return true;
    }
    false
}

/// Skips any run of newline tokens.
pub(in crate::interpreter::parser) fn consume_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((Token::Newline, _)) = tokens.peek() {
        tokens.next();
    }
}
