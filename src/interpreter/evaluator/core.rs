use std::{collections::HashMap, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::{Block, ElseIf, Expr, FunctionDef, LogicalOperator, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::apply_binary, builtins, unary::apply_unary},
        host::Host,
        range::Clipboard,
        table::{TableHandle, TableStore},
        value::Value,
    },
    util::num,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control signal returned by every statement evaluator.
///
/// Ordinary language control flow does not use host exceptions: `trả_về`
/// and `bỏ_qua` travel upward as tagged signals that every block, loop and
/// conditional checks and forwards. A `Return` unwinds to the nearest
/// function-call boundary; a `Skip` unwinds to the nearest `lặp`, and is
/// silently discarded if it reaches the top level with no enclosing loop.
pub enum Control {
    /// Normal completion, with the statement's value if it produced one.
    Normal(Option<Value>),
    /// A `trả_về` in flight.
    Return(Value),
    /// A `bỏ_qua` in flight.
    Skip,
}

/// Stores the runtime evaluation state.
///
/// One `Runtime` is created per `run` invocation and discarded afterwards:
/// the variable mapping, user function table, currently selected table
/// handle, and the one-slot range clipboard, plus borrows of the two
/// external collaborators (table store and host).
pub struct Runtime<'a> {
    /// The flat variable mapping.
    pub vars:      HashMap<String, Value>,
    /// Registered user-defined functions.
    pub functions: HashMap<String, Rc<FunctionDef>>,
    /// The currently selected table, if any.
    pub table:     Option<TableHandle>,
    /// The range-copy clipboard, if anything has been copied.
    pub clipboard: Option<Clipboard>,
    /// Resolver for `chọn_bảng`.
    pub tables:    &'a dyn TableStore,
    /// Display/prompt collaborator.
    pub host:      &'a mut dyn Host,
}

impl<'a> Runtime<'a> {
    /// Creates a fresh runtime over the given collaborators, with no
    /// variables, no functions, no selected table and an empty clipboard.
    pub fn new(tables: &'a dyn TableStore, host: &'a mut dyn Host) -> Self {
        Self { vars: HashMap::new(),
               functions: HashMap::new(),
               table: None,
               clipboard: None,
               tables,
               host }
    }

    /// Evaluates a whole program.
    ///
    /// Statements run in order; the result is the value of the last
    /// statement that produced one. A top-level `trả_về` ends the program
    /// with its value; a top-level `bỏ_qua` is discarded.
    pub fn eval_program(&mut self, program: &Program) -> EvalResult<Option<Value>> {
        let mut result = None;
        for statement in &program.body {
            match self.eval_statement(statement)? {
                Control::Normal(value) => result = value,
                Control::Return(value) => return Ok(Some(value)),
                Control::Skip => result = None,
            }
        }
        Ok(result)
    }

    /// Evaluates a single statement, producing a control signal.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Control> {
        match statement {
            Statement::SelectTable { id, line } => {
                let handle =
                    self.tables
                        .resolve(id)
                        .ok_or_else(|| RuntimeError::UnknownTable { id:   id.clone(),
                                                                    line: *line, })?;
                self.table = Some(handle);
                Ok(Control::Normal(None))
            },
            Statement::Assign { target, value, line } => {
                self.eval_assignment(target, value, *line)?;
                Ok(Control::Normal(None))
            },
            Statement::Display { expr, .. } => {
                let value = self.eval_expression(expr)?;
                let message = value.to_message();
                self.host.show(&message);
                Ok(Control::Normal(None))
            },
            Statement::Expression { expr, .. } => {
                Ok(Control::Normal(Some(self.eval_expression(expr)?)))
            },
            Statement::Skip { .. } => Ok(Control::Skip),
            Statement::Return { expr, .. } => Ok(Control::Return(self.eval_expression(expr)?)),
            Statement::Function(def) => {
                self.functions.insert(def.name.clone(), Rc::clone(def));
                Ok(Control::Normal(None))
            },
            Statement::If { cond,
                            then_block,
                            else_ifs,
                            otherwise,
                            .. } => self.eval_if(cond, then_block, else_ifs, otherwise.as_ref()),
            Statement::For { var,
                             start,
                             end,
                             body,
                             line, } => self.eval_for(var, start, end, body, *line),
        }
    }

    /// Evaluates an `nếu` chain: the first truthy condition's block runs,
    /// then the optional `khác` block. At most one branch executes.
    fn eval_if(&mut self,
               cond: &Expr,
               then_block: &Block,
               else_ifs: &[ElseIf],
               otherwise: Option<&Block>)
               -> EvalResult<Control> {
        if self.eval_expression(cond)?.truthy() {
            return self.forward_block(then_block);
        }
        for clause in else_ifs {
            if self.eval_expression(&clause.cond)?.truthy() {
                return self.forward_block(&clause.body);
            }
        }
        match otherwise {
            Some(block) => self.forward_block(block),
            None => Ok(Control::Normal(None)),
        }
    }

    /// Runs a branch block, forwarding `Return`/`Skip` signals upward.
    fn forward_block(&mut self, block: &Block) -> EvalResult<Control> {
        match self.eval_block(block)? {
            Control::Normal(_) => Ok(Control::Normal(None)),
            signal => Ok(signal),
        }
    }

    /// Evaluates the statements of a block in order, stopping early on a
    /// `Return` or `Skip` signal and handing it to the caller.
    pub fn eval_block(&mut self, block: &Block) -> EvalResult<Control> {
        for statement in &block.statements {
            match self.eval_statement(statement)? {
                Control::Normal(_) => {},
                signal => return Ok(signal),
            }
        }
        Ok(Control::Normal(None))
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The
    /// evaluator dispatches based on expression variant: literals,
    /// variables, indexing, unary, logical and binary operations, calls,
    /// and inline assignment.
    pub fn eval_expression(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
            Expr::Array { elements, .. } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval_expression(element)?);
                }
                Ok(Value::array(items))
            },
            Expr::Object { entries, .. } => {
                let mut map = IndexMap::new();
                for (key_expr, value_expr) in entries {
                    let key = self.eval_expression(key_expr)?.text();
                    let value = self.eval_expression(value_expr)?;
                    map.insert(key, value);
                }
                Ok(Value::object(map))
            },
            Expr::Var { name, .. } => Ok(self.lookup(name)),
            Expr::Index { base, index, .. } => {
                let base = self.eval_expression(base)?;
                let index = self.eval_expression(index)?;
                Ok(index_read(&base, &index))
            },
            Expr::Unary { op, expr, .. } => {
                let value = self.eval_expression(expr)?;
                Ok(apply_unary(*op, &value))
            },
            Expr::Logical { op, left, right, .. } => self.eval_logical(*op, left, right),
            Expr::Binary { op, left, right, .. } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                Ok(apply_binary(*op, &left, &right))
            },
            Expr::Assign { target, value, line } => self.eval_assignment(target, value, *line),
            Expr::Call { name, args, line } => self.eval_call(name, args, *line),
        }
    }

    /// Resolves a bare identifier: variables first, then registered
    /// functions (yielding a first-class function value), then Null.
    /// An unknown name is not an error.
    fn lookup(&self, name: &str) -> Value {
        if let Some(value) = self.vars.get(name) {
            return value.clone();
        }
        if let Some(def) = self.functions.get(name) {
            return Value::Function(Rc::clone(def));
        }
        Value::Null
    }

    /// Short-circuit evaluation of `và`/`hoặc`, returning an operand value
    /// rather than a boolean.
    fn eval_logical(&mut self,
                    op: LogicalOperator,
                    left: &Expr,
                    right: &Expr)
                    -> EvalResult<Value> {
        let left = self.eval_expression(left)?;
        match op {
            LogicalOperator::Or => {
                if left.truthy() {
                    Ok(left)
                } else {
                    self.eval_expression(right)
                }
            },
            LogicalOperator::And => {
                if left.truthy() {
                    self.eval_expression(right)
                } else {
                    Ok(left)
                }
            },
        }
    }

    /// Performs an assignment and returns the assigned value.
    ///
    /// Valid targets: a variable (rebinds the name), an index expression
    /// (an in-bounds array element, with no auto-growth, or object key), or a
    /// two-argument `ô(...)` call writing through to the selected table.
    pub(crate) fn eval_assignment(&mut self,
                                  target: &Expr,
                                  value: &Expr,
                                  line: usize)
                                  -> EvalResult<Value> {
        match target {
            Expr::Var { name, .. } => {
                let assigned = self.eval_expression(value)?;
                self.vars.insert(name.clone(), assigned.clone());
                Ok(assigned)
            },
            Expr::Index { base, index, line } => {
                let index_value = self.eval_expression(index)?;
                let assigned = self.eval_expression(value)?;
                let base_value = self.eval_expression(base)?;
                match &base_value {
                    Value::Array(items) => {
                        let len = items.borrow().len();
                        match num::index_from_f64(index_value.to_number()) {
                            Some(i) if i < len => items.borrow_mut()[i] = assigned.clone(),
                            _ => {
                                return Err(RuntimeError::IndexOutOfBounds {
                                    index: num::f64_to_i64(index_value.to_number())
                                        .unwrap_or(-1),
                                    len,
                                    line: *line,
                                });
                            },
                        }
                    },
                    Value::Object(map) => {
                        map.borrow_mut().insert(index_value.text(), assigned.clone());
                    },
                    _ => return Err(RuntimeError::InvalidIndexTarget { line: *line }),
                }
                Ok(assigned)
            },
            Expr::Call { name, args, line } if name == "ô" => {
                let row = match args.first() {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Null,
                };
                let col = match args.get(1) {
                    Some(expr) => self.eval_expression(expr)?,
                    None => Value::Null,
                };
                let assigned = self.eval_expression(value)?;
                builtins::grid::write_cell(self, &row, &col, &assigned, *line)?;
                Ok(assigned)
            },
            _ => Err(RuntimeError::InvalidAssignmentTarget { line }),
        }
    }

    /// Returns the currently selected table handle, or the
    /// no-table-selected error.
    pub(crate) fn selected_table(&self, line: usize) -> EvalResult<TableHandle> {
        self.table
            .clone()
            .ok_or(RuntimeError::NoTableSelected { line })
    }
}

/// Reads through an index expression.
///
/// Arrays index by floored number (out of bounds reads Null); objects index
/// by the index value's text form (missing keys read Null); anything else
/// reads Null.
pub(crate) fn index_read(base: &Value, index: &Value) -> Value {
    match base {
        Value::Array(items) => {
            let items = items.borrow();
            match num::index_from_f64(index.to_number()) {
                Some(i) if i < items.len() => items[i].clone(),
                _ => Value::Null,
            }
        },
        Value::Object(map) => map.borrow()
                                 .get(&index.text())
                                 .cloned()
                                 .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
