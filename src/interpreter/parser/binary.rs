use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary, utils::peek_keyword},
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of the `hoặc` keyword. OR has the lowest
/// precedence apart from assignment, and short-circuits at evaluation time.
///
/// Grammar: `logical_or := logical_and ("hoặc" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An expression tree using `LogicalOperator::Or` nodes.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_logical_and(tokens)?;

    while let Some(line) = peek_keyword(tokens, "hoặc") {
        tokens.next();

        let right = parse_logical_and(tokens)?;

        left = Expr::Logical { op: LogicalOperator::Or,
                               left: Box::new(left),
                               right: Box::new(right),
                               line };
    }

    Ok(left)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of the `và` keyword. Precedence is
/// between OR and the comparison operators.
///
/// Grammar: `logical_and := comparison ("và" comparison)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An expression tree using `LogicalOperator::And` nodes.
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_comparison(tokens)?;

    while let Some(line) = peek_keyword(tokens, "và") {
        tokens.next();

        let right = parse_comparison(tokens)?;

        left = Expr::Logical { op: LogicalOperator::And,
                               left: Box::new(left),
                               right: Box::new(right),
                               line };
    }

    Ok(left)
}

/// Parses equality and relational operators.
///
/// All six comparisons (`==`, `!=`, `<=`, `>=`, `<`, `>`) live on a single
/// level and fold left-to-right, so `a < b < c` parses as `(a < b) < c`;
/// there is no chained-comparison special case.
///
/// Grammar: `comparison := additive (comparison_op additive)*`
///
/// # Parameters
/// - `tokens`: Token stream (token + line number) wrapped in a `Peekable`.
///
/// # Returns
/// A possibly nested `Expr::Binary` tree.
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens)?;

    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && is_comparison_op(op)
        {
            let line = *line;
            tokens.next();

            let right = parse_additive(tokens)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = *line;
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/` and `%`.
///
/// Grammar: `multiplicative := unary (("*" | "/" | "%") unary)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining unary-level nodes.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
        {
            let line = *line;
            tokens.next();
            let right = parse_unary(tokens)?;
            left = Expr::Binary { op,
                                  left: Box::new(left),
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents an arithmetic or
/// comparison operator, `None` for all other tokens. The logical keywords
/// `và`/`hoặc` are identifiers, not operator tokens, and are handled
/// separately.
///
/// # Example
/// ```
/// use datable::{ast::BinaryOperator,
///               interpreter::{lexer::Token, parser::binary::token_to_binary_operator}};
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        _ => None,
    }
}

/// Determines whether a binary operator belongs to the comparison class.
#[must_use]
pub const fn is_comparison_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::LessEqual
             | BinaryOperator::GreaterEqual
             | BinaryOperator::Less
             | BinaryOperator::Greater)
}
