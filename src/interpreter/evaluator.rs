/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: the
/// null-aware `+`, numeric arithmetic, and textual/numeric comparisons.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and runtime state.
///
/// Contains the main evaluation engine, the runtime state struct, the
/// control-signal enum, and assignment/index handling.
pub mod core;

/// Evaluation of `lặp` statements.
pub mod for_loop;

/// Function and callback invocation.
///
/// Builtin-then-user call resolution, call-frame snapshot/restore, and the
/// two callback forms (function values and expression strings).
pub mod call;

/// The built-in function library.
pub mod builtins;
