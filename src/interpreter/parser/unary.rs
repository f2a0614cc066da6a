use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{parse_comma_separated, peek_keyword},
        },
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators:
/// - `-`      (numeric negation)
/// - `không`  (logical not)
///
/// A prefix operator binds to a single postfix-chain operand, not to another
/// unary expression, so `- -x` is not valid while `-a[0]` negates the
/// indexed element.
///
/// Grammar:
/// ```text
///     unary := ("-" | "không") postfix
///            | postfix
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or an atom possibly followed by index postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Minus, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_postfix_operand(tokens)?;
        return Ok(Expr::Unary { op: UnaryOperator::Negate,
                                expr: Box::new(expr),
                                line });
    }
    if let Some(line) = peek_keyword(tokens, "không") {
        tokens.next();
        let expr = parse_postfix_operand(tokens)?;
        return Ok(Expr::Unary { op: UnaryOperator::Not,
                                expr: Box::new(expr),
                                line });
    }
    parse_postfix_operand(tokens)
}

/// Parses an atom followed by any chain of postfix index operators.
///
/// Indexing is left-associative and chains for multi-dimensional access:
/// `m[0][1]` parses as `(m[0])[1]`.
///
/// Grammar:
/// ```text
///     postfix := atom ("[" expression "]")*
/// ```
pub(crate) fn parse_postfix_operand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut node = parse_atom(tokens)?;

    while let Some((Token::LBracket, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let index = parse_expression(tokens)?;
        match tokens.next() {
            Some((Token::RBracket, _)) => {
                node = Expr::Index { base: Box::new(node),
                                     index: Box::new(index),
                                     line };
            },
            _ => return Err(ParseError::ExpectedClosingBracket { line }),
        }
    }

    Ok(node)
}

/// Parses a primary (atomic) expression.
///
/// Atoms include:
/// - numeric and string literals
/// - identifiers and calls (`name(args...)`)
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
/// - object literals (`{ key: value, ... }`) with expression keys
///
/// Grammar (simplified):
/// ```text
///     atom := literal
///           | identifier ["(" args ")"]
///           | "(" expression ")"
///           | "[" elements "]"
///           | "{" entries "}"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an atom.
///
/// # Returns
/// The parsed [`Expr`] or a `ParseError` on failure.
fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match peeked {
        (Token::Number(_), _) => parse_number_literal(tokens),
        (Token::Str(_), _) => parse_string_literal(tokens),
        (Token::Identifier(_), _) => parse_identifier_or_call(tokens),
        (Token::LParen, _) => parse_grouping(tokens),
        (Token::LBracket, _) => parse_array_literal(tokens),
        (Token::LBrace, _) => parse_object_literal(tokens),
        (tok, line) => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                         line:  *line, }),
    }
}

fn parse_number_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Number(value), line)) = tokens.next() else {
        unreachable!()
    };
    Ok(Expr::Number { value: *value,
                      line:  *line, })
}

fn parse_string_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Str(value), line)) = tokens.next() else {
        unreachable!()
    };
    Ok(Expr::Str { value: value.clone(),
                   line:  *line, })
}

/// Parses an identifier or a function call.
///
/// A call exists only as identifier-immediately-followed-by `(`; there are
/// no first-class invocable expressions other than named functions and
/// builtins. A bare identifier is a variable reference.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = match tokens.next() {
        Some((Token::Identifier(n), line)) => (n.clone(), *line),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                     line:  *line, });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { line: 0 });
        },
    };

    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();
        let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        return Ok(Expr::Call { name, args, line });
    }

    Ok(Expr::Var { name, line })
}

/// Parses a parenthesized expression.
///
/// The inner expression is returned as-is (no wrapper node). Failure to find
/// the closing parenthesis yields `ParseError::ExpectedClosingParen`.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        unreachable!()
    };
    let expr = parse_expression(tokens)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line: *line }),
    }
}

/// Parses an array literal of the form `[expr1, expr2, ..., exprN]`.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        unreachable!()
    };
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
    Ok(Expr::Array { elements,
                     line: *line })
}

/// Parses an object literal of the form `{key: value, ...}`.
///
/// Keys are full expressions (typically string literals); an empty literal
/// `{}` is accepted. A missing `:` between key and value is a parse error.
fn parse_object_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((_, line)) = tokens.next() else {
        unreachable!()
    };
    let line = *line;

    let mut entries = Vec::new();
    if let Some((Token::RBrace, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Object { entries, line });
    }

    loop {
        let key = parse_expression(tokens)?;
        match tokens.next() {
            Some((Token::Colon, _)) => {},
            Some((_, colon_line)) => {
                return Err(ParseError::ExpectedObjectColon { line: *colon_line });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
        let value = parse_expression(tokens)?;
        entries.push((key, value));

        match tokens.next() {
            Some((Token::RBrace, _)) => break,
            Some((Token::Comma, _)) => {},
            Some((tok, entry_line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or '}}', found {tok:?}"),
                                                         line:  *entry_line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Expr::Object { entries, line })
}
