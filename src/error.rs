/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include indentation mistakes, unexpected tokens,
/// missing keywords or punctuation, and misplaced clause keywords.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution. Runtime errors include missing table selection, unresolvable
/// table ids, invalid assignment targets, out-of-bounds indices, and unknown
/// function names.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
