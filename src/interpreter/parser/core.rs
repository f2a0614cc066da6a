use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_logical_or},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens)
}

/// Parses the assignment level of the expression grammar.
///
/// Assignment is right-associative and is itself an expression returning the
/// assigned value, so `a = b = 5` assigns 5 to both names. The target may be
/// any expression here; whether it is a valid assignment target (variable,
/// index, or `ô(...)` call) is checked at evaluation time.
///
/// Grammar: `assignment := logical_or ("=" assignment)?`
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_logical_or(tokens)?;

    if let Some((Token::Equals, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let value = parse_assignment(tokens)?;
        return Ok(Expr::Assign { target: Box::new(left),
                                 value: Box::new(value),
                                 line });
    }

    Ok(left)
}
