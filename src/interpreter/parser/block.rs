use std::iter::Peekable;

use crate::{
    ast::Block,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{accept, consume_newlines},
        },
    },
};

/// Parses a block body following a header line.
///
/// Two surface forms are accepted:
/// - an `Indent`-delimited sequence of statements terminated by `Dedent`, or
/// - if no `Indent` follows the header, exactly one statement taken inline
///   (which is what makes single-line forms like `nếu x: y = 1` work).
///
/// # Parameters
/// - `tokens`: Token stream positioned after the header's newline.
///
/// # Returns
/// A [`Block`] containing all parsed statements.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if accept(tokens, &Token::Indent) {
        let mut statements = Vec::new();

        loop {
            consume_newlines(tokens);

            if accept(tokens, &Token::Dedent) {
                break;
            }
            if let Some((Token::Eof, line)) = tokens.peek() {
                return Err(ParseError::UnexpectedEndOfInput { line: *line });
            }

            statements.push(parse_statement(tokens)?);
        }

        return Ok(Block { statements });
    }

    let statement = parse_statement(tokens)?;
    Ok(Block { statements: vec![statement] })
}
