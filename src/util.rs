/// Numeric conversion helpers.
///
/// This module provides the conversions the evaluator's loose coercion
/// rules need when a float has to become an integer: truncation for loop
/// bounds, flooring for 0-based array indices, and flooring for 1-based
/// grid positions. All of them treat NaN as "no integer" rather than
/// guessing a value.
pub mod num;
