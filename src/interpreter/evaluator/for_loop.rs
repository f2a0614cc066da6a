use crate::{
    ast::{Block, Expr},
    interpreter::{
        evaluator::core::{Control, EvalResult, Runtime},
        value::Value,
    },
    util::num,
};

impl Runtime<'_> {
    /// Evaluates a `lặp i từ A đến B` statement.
    ///
    /// Both bounds are evaluated once and truncated toward zero. The loop
    /// variable is rebound in the shared variable mapping on every
    /// iteration of the inclusive ascending range; the body sees and may
    /// overwrite it, and it keeps its final value after the loop. When the
    /// start exceeds the end (or either bound is NaN) the body never runs.
    ///
    /// A `bỏ_qua` signal from the body is consumed here and moves the loop
    /// to its next iteration; a `trả_về` signal is forwarded upward.
    pub(crate) fn eval_for(&mut self,
                           var: &str,
                           start: &Expr,
                           end: &Expr,
                           body: &Block,
                           _line: usize)
                           -> EvalResult<Control> {
        let start = num::f64_to_i64(self.eval_expression(start)?.to_number());
        let end = num::f64_to_i64(self.eval_expression(end)?.to_number());
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(Control::Normal(None));
        };

        for i in start..=end {
            self.vars.insert(var.to_string(), Value::Number(i as f64));
            match self.eval_block(body)? {
                Control::Normal(_) | Control::Skip => {},
                signal @ Control::Return(_) => return Ok(signal),
            }
        }

        Ok(Control::Normal(None))
    }
}
