use crate::{ast::BinaryOperator, interpreter::value::Value};

/// Applies a binary operator to two evaluated operands.
///
/// The semantics mirror the language's loose coercion rules:
///
/// - `+`: a Null operand is treated as the empty string; if both remaining
///   operands are numbers the result is numeric addition, otherwise both are
///   coerced to text and concatenated.
/// - `- * / %`: both operands coerce to numbers (non-numeric → 0) and follow
///   floating-point semantics, including division by zero producing
///   infinities or NaN.
/// - `== !=`: both operands compare by their text form.
/// - `< > <= >=`: both operands compare numerically (comparisons against
///   NaN are false).
///
/// Binary application never fails; every value coerces.
#[must_use]
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    match op {
        BinaryOperator::Add => apply_add(left, right),
        BinaryOperator::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOperator::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOperator::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOperator::Mod => Value::Number(left.to_number() % right.to_number()),
        BinaryOperator::Equal => Value::Bool(left.text() == right.text()),
        BinaryOperator::NotEqual => Value::Bool(left.text() != right.text()),
        BinaryOperator::LessEqual => Value::Bool(left.to_number() <= right.to_number()),
        BinaryOperator::GreaterEqual => Value::Bool(left.to_number() >= right.to_number()),
        BinaryOperator::Less => Value::Bool(left.to_number() < right.to_number()),
        BinaryOperator::Greater => Value::Bool(left.to_number() > right.to_number()),
    }
}

fn apply_add(left: &Value, right: &Value) -> Value {
    if let (Value::Number(a), Value::Number(b)) = (left, right) {
        return Value::Number(a + b);
    }
    let left_text = match left {
        Value::Null => String::new(),
        other => other.text(),
    };
    let right_text = match right {
        Value::Null => String::new(),
        other => other.text(),
    };
    Value::Str(left_text + &right_text)
}
