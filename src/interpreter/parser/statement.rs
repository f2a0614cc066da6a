use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ElseIf, Expr, FunctionDef, Program, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{accept, accept_keyword, consume_newlines, parse_identifier, peek_keyword},
        },
    },
};

/// Parses a whole program: top-level statements until `Eof`.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Program`].
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Program>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut body = Vec::new();

    loop {
        consume_newlines(tokens);
        match tokens.peek() {
            Some((Token::Eof, _)) | None => break,
            _ => body.push(parse_statement(tokens)?),
        }
    }

    Ok(Program { body })
}

/// Parses a single statement.
///
/// Statement dispatch is keyword-driven on the leading identifier:
/// table selection, `gán` assignment, `nếu`, `lặp`, `hàm`, `hiển_thị`,
/// `trả_về`, `bỏ_qua`. A misplaced else-clause keyword is rejected here.
/// Any other identifier is checked for the `name = expr` assignment shape
/// before falling back to a generic expression statement, which also covers
/// leading `ô(...)`, `gọi`, and the structural grid builtins used as
/// statements.
///
/// Statements must begin with an identifier; leading newlines are skipped.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    consume_newlines(tokens);

    let (keyword, line) = match tokens.peek() {
        Some((Token::Identifier(name), line)) => (name.clone(), *line),
        Some((Token::Eof, line)) => {
            return Err(ParseError::UnexpectedEndOfInput { line: *line });
        },
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    match keyword.as_str() {
        "chọn_bảng" => parse_select_table(tokens, line),
        "gán" => parse_gan(tokens, line),
        "nếu" => parse_if(tokens, line),
        "lặp" => parse_for(tokens, line),
        "hàm" => parse_function_def(tokens, line),
        "hiển_thị" => parse_display(tokens, line),
        "trả_về" => parse_return(tokens, line),
        "bỏ_qua" => {
            tokens.next();
            consume_newlines(tokens);
            Ok(Statement::Skip { line })
        },
        "khác_nếu" | "nếu_không" | "khác" => {
            Err(ParseError::MisplacedElseClause { keyword, line })
        },
        _ => parse_assignment_or_expression(tokens, line),
    }
}

/// Parses `chọn_bảng "id"`.
fn parse_select_table<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let id = match tokens.next() {
        Some((Token::Str(id), _)) => id.clone(),
        _ => return Err(ParseError::ExpectedTableName { line }),
    };
    consume_newlines(tokens);

    Ok(Statement::SelectTable { id, line })
}

/// Parses the comma form of assignment: `gán target, expr`.
///
/// The target is a full expression; validity as an assignment target is a
/// runtime concern, not a parse one.
fn parse_gan<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let target = parse_expression(tokens)?;
    if !accept(tokens, &Token::Comma) {
        return Err(ParseError::ExpectedComma { line });
    }
    let value = parse_expression(tokens)?;
    consume_newlines(tokens);

    Ok(Statement::Assign { target, value, line })
}

/// Parses `hiển_thị expr`.
fn parse_display<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let expr = parse_expression(tokens)?;
    consume_newlines(tokens);

    Ok(Statement::Display { expr, line })
}

/// Parses `trả_về expr`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let expr = parse_expression(tokens)?;
    consume_newlines(tokens);

    Ok(Statement::Return { expr, line })
}

/// Parses an `nếu` statement with its clause chain.
///
/// Zero or more `khác_nếu`/`nếu_không` clauses (two spellings, same
/// meaning) may follow the primary block, then an optional final `khác`
/// block. Every header accepts an optional trailing `:`.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let cond = parse_expression(tokens)?;
    accept(tokens, &Token::Colon);
    consume_newlines(tokens);
    let then_block = parse_block(tokens)?;

    let mut else_ifs = Vec::new();
    while peek_keyword(tokens, "khác_nếu").is_some() || peek_keyword(tokens, "nếu_không").is_some()
    {
        tokens.next();
        let cond = parse_expression(tokens)?;
        accept(tokens, &Token::Colon);
        consume_newlines(tokens);
        let body = parse_block(tokens)?;
        else_ifs.push(ElseIf { cond, body });
    }

    let otherwise = if peek_keyword(tokens, "khác").is_some() {
        tokens.next();
        accept(tokens, &Token::Colon);
        consume_newlines(tokens);
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Statement::If { cond,
                       then_block,
                       else_ifs,
                       otherwise,
                       line })
}

/// Parses `lặp i từ A đến B` with its body.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let var = parse_identifier(tokens)?;
    if !accept_keyword(tokens, "từ") {
        return Err(ParseError::ExpectedKeyword { keyword: "từ".to_string(),
                                                 line });
    }
    let start = parse_expression(tokens)?;
    if !accept_keyword(tokens, "đến") {
        return Err(ParseError::ExpectedKeyword { keyword: "đến".to_string(),
                                                 line });
    }
    let end = parse_expression(tokens)?;
    accept(tokens, &Token::Colon);
    consume_newlines(tokens);
    let body = parse_block(tokens)?;

    Ok(Statement::For { var,
                        start,
                        end,
                        body,
                        line })
}

/// Parses `hàm name(param, ...)` with its body.
///
/// The parameter list is optional: `hàm chào:` defines a zero-parameter
/// function. Commas between parameters are accepted but not required.
fn parse_function_def<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    tokens.next();

    let name = parse_identifier(tokens)?;
    let mut params = Vec::new();
    if accept(tokens, &Token::LParen) {
        loop {
            if accept(tokens, &Token::RParen) {
                break;
            }
            params.push(parse_identifier(tokens)?);
            accept(tokens, &Token::Comma);
        }
    }
    accept(tokens, &Token::Colon);
    consume_newlines(tokens);
    let body = parse_block(tokens)?;

    Ok(Statement::Function(Rc::new(FunctionDef { name,
                                                 params,
                                                 body,
                                                 line })))
}

/// Parses the `name = expr` statement shape, falling back to a generic
/// expression statement.
///
/// The lookahead is limited: only an identifier directly followed by `=`
/// takes the dedicated assignment path; everything else (including index
/// and cell-call assignments) goes through the expression grammar, whose
/// assignment rule covers those forms.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>,
                                         line: usize)
                                         -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();
    if let Some((Token::Equals, _)) = lookahead.peek() {
        let name = if let Some((Token::Identifier(n), _)) = tokens.next() {
            n.clone()
        } else {
            unreachable!()
        };
        tokens.next();

        let value = parse_expression(tokens)?;
        consume_newlines(tokens);
        return Ok(Statement::Assign { target: Expr::Var { name, line },
                                      value,
                                      line });
    }

    let expr = parse_expression(tokens)?;
    consume_newlines(tokens);
    Ok(Statement::Expression { expr, line })
}
