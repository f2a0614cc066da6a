use crate::{ast::UnaryOperator, interpreter::value::Value};

/// Applies a unary operator to an evaluated operand.
///
/// `-` coerces the operand to a number and negates it; `không` applies
/// truthiness coercion and inverts it. Unary application never fails.
#[must_use]
pub fn apply_unary(op: UnaryOperator, value: &Value) -> Value {
    match op {
        UnaryOperator::Negate => Value::Number(-value.to_number()),
        UnaryOperator::Not => Value::Bool(!value.truthy()),
    }
}
