//! # datable
//!
//! DaTable is a small, Unicode-aware scripting language with Vietnamese
//! keywords for working with tables and data. Source text is lexed into an
//! indentation-sensitive token stream, parsed into an AST, and executed by
//! a tree-walking evaluator against a grid-shaped table resource.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    evaluator::core::Runtime,
    host::Host,
    lexer::lex,
    parser::statement::parse_program,
    table::TableStore,
    value::Value,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and
/// source lines for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, the grid and host collaborators, and all supporting
/// infrastructure to provide a complete runtime for DaTable scripts.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Defines the collaborator traits for tables and host I/O.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion.
pub mod util;

/// Runs a DaTable script against a table store and a host.
///
/// The source is lexed, parsed, and evaluated with a fresh runtime; no
/// interpreter state survives between calls. The result is the value of the
/// last value-producing statement (usually `None` for scripts that end in
/// displays or writes). Any lexer, parser, or evaluator failure is returned
/// as the single error; nothing panics and nothing escapes the `Result`.
///
/// # Errors
/// Returns the first `ParseError` or `RuntimeError` encountered, boxed.
///
/// # Examples
/// ```
/// use datable::{interpreter::{host::Host, table::Workbook}, run};
///
/// struct Silent;
/// impl Host for Silent {
///     fn show(&mut self, _message: &str) {}
///     fn ask(&mut self, _prompt: &str) -> Option<String> {
///         None
///     }
/// }
///
/// let workbook = Workbook::auto_create();
/// let mut host = Silent;
///
/// let result = run("x = 2 + 3\nx * 2", &workbook, &mut host).unwrap();
/// assert_eq!(result.map(|v| v.to_number()), Some(10.0));
///
/// // an unknown builtin is an error, not a panic
/// assert!(run("hàm_lạ(1)", &workbook, &mut host).is_err());
/// ```
pub fn run(source: &str,
           tables: &dyn TableStore,
           host: &mut dyn Host)
           -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let tokens = lex(source)?;
    let mut iter = tokens.iter().peekable();
    let program = parse_program(&mut iter)?;

    let mut runtime = Runtime::new(tables, host);
    Ok(runtime.eval_program(&program)?)
}
