use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtins,
            core::{Control, EvalResult, Runtime},
        },
        lexer::lex,
        parser::core::parse_expression,
        value::Value,
    },
};

impl Runtime<'_> {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated left to right before the callee runs.
    /// Builtins are resolved first by exact name; otherwise a user-defined
    /// function of that name is looked up. A name matching neither is a
    /// runtime error.
    pub(crate) fn eval_call(&mut self, name: &str, args: &[Expr], line: usize) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expression(arg)?);
        }

        if let Some(handler) = builtins::lookup(name) {
            return handler(self, values, line);
        }

        let Some(def) = self.functions.get(name).map(Rc::clone) else {
            return Err(RuntimeError::UnknownFunction { name: name.to_string(),
                                                       line });
        };
        self.call_function(&def, values)
    }

    /// Executes a user-defined function.
    ///
    /// The whole variable mapping is snapshotted, parameters are bound into
    /// the live mapping (missing arguments bind to Null, extra arguments
    /// are ignored), the body runs, and the caller's mapping is restored
    /// verbatim, so nothing a function writes to an existing name is
    /// observable after it returns. A `trả_về` signal becomes the call's
    /// result; falling off the end (or a stray `bỏ_qua`) yields Null.
    pub(crate) fn call_function(&mut self,
                                def: &FunctionDef,
                                args: Vec<Value>)
                                -> EvalResult<Value> {
        let saved = self.vars.clone();
        for (index, param) in def.params.iter().enumerate() {
            self.vars
                .insert(param.clone(), args.get(index).cloned().unwrap_or(Value::Null));
        }

        let outcome = self.eval_block(&def.body);
        self.vars = saved;

        match outcome? {
            Control::Return(value) => Ok(value),
            Control::Normal(_) | Control::Skip => Ok(Value::Null),
        }
    }

    /// Invokes a compiled callback with the given arguments.
    ///
    /// Function callbacks go through the normal call path. Expression
    /// callbacks bind their fixed implicit parameters under the same
    /// snapshot/restore discipline as a function call, so a callback cannot
    /// leak writes into the enclosing frame.
    pub(crate) fn invoke_callback(&mut self,
                                  callback: &Callback,
                                  args: &[Value])
                                  -> EvalResult<Value> {
        match callback {
            Callback::Function(def) => self.call_function(def, args.to_vec()),
            Callback::Expression { expr, params } => {
                let saved = self.vars.clone();
                for (index, param) in params.iter().enumerate() {
                    self.vars
                        .insert((*param).to_string(),
                                args.get(index).cloned().unwrap_or(Value::Null));
                }
                let outcome = self.eval_expression(expr);
                self.vars = saved;
                outcome
            },
        }
    }
}

/// A compiled callback argument for the array/object builtins.
pub(crate) enum Callback {
    /// A first-class function value.
    Function(Rc<FunctionDef>),
    /// A source-string expression with its fixed implicit parameter names.
    Expression {
        /// The parsed expression.
        expr:   Expr,
        /// Implicit parameter names bound per invocation.
        params: &'static [&'static str],
    },
}

/// Compiles a callback argument.
///
/// A function value is used directly. A string is run through the normal
/// lexer and expression parser once per builtin call, then evaluated per
/// element with the given implicit parameters bound; there is no ambient
/// host-code generation. Anything else is an error.
pub(crate) fn compile_callback(value: &Value,
                               params: &'static [&'static str],
                               line: usize)
                               -> EvalResult<Callback> {
    match value {
        Value::Function(def) => Ok(Callback::Function(Rc::clone(def))),
        Value::Str(source) => {
            let tokens =
                lex(source).map_err(|e| RuntimeError::InvalidCallbackExpression {
                    message: e.to_string(),
                    line,
                })?;
            let mut iter = tokens.iter().peekable();
            let expr = parse_expression(&mut iter).map_err(|e| {
                                                      RuntimeError::InvalidCallbackExpression {
                    message: e.to_string(),
                    line,
                }
                                                  })?;
            Ok(Callback::Expression { expr, params })
        },
        _ => Err(RuntimeError::InvalidCallback { line }),
    }
}
