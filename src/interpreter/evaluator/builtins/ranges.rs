use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtins::arg,
            core::{EvalResult, Runtime},
        },
        range::{Clipboard, parse_a1},
        table::TableHandle,
        value::Value,
    },
    util::num,
};

/// Extracts the required string reference of a range builtin, e.g. `"A1:E3"`.
fn range_text(value: &Value, line: usize) -> EvalResult<String> {
    match value {
        Value::Str(text) => Ok(text.clone()),
        other => Err(RuntimeError::InvalidRange { text: other.text(),
                                                  line }),
    }
}

/// Writes a value into one cell, rejecting row/column 0 references like
/// `A0`.
fn put(table: &TableHandle, row: usize, col: usize, value: &Value, line: usize) -> EvalResult<()> {
    if row == 0 || col == 0 {
        return Err(RuntimeError::InvalidCellIndex { line });
    }
    let text = match value {
        Value::Null => String::new(),
        other => other.text(),
    };
    table.borrow_mut().set_cell(row, col, &text);
    Ok(())
}

/// `vùng(range)`: reads a rectangle of cells.
///
/// A single-column rectangle reads as a flat list; anything wider reads as
/// a list of row-lists. Cells outside the current bounds read as empty
/// strings.
pub fn read_range(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let range = parse_a1(&range_text(&arg(&args, 0), line)?, line)?;

    let single_column = range.c1 == range.c2;
    let mut out = Vec::new();
    for row in range.r1..=range.r2 {
        let mut cells = Vec::new();
        for col in range.c1..=range.c2 {
            cells.push(Value::Str(table.borrow().get_cell(row, col)));
        }
        if single_column {
            out.extend(cells);
        } else {
            out.push(Value::array(cells));
        }
    }
    Ok(Value::array(out))
}

/// `đặt_vùng(range, value)`: writes into a rectangle.
///
/// A scalar is broadcast to every cell. A list writes positionally in
/// row-major order: flat elements fill cells one by one across the
/// rectangle, a nested row-list fills (at most) one row; writing stops when
/// the data runs out.
pub fn write_range(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let range = parse_a1(&range_text(&arg(&args, 0), line)?, line)?;
    let value = arg(&args, 1);

    let Value::Array(items) = &value else {
        for row in range.r1..=range.r2 {
            for col in range.c1..=range.c2 {
                put(&table, row, col, &value, line)?;
            }
        }
        return Ok(Value::Null);
    };

    let data = items.borrow().clone();
    let mut index = 0;
    for row in range.r1..=range.r2 {
        if index >= data.len() {
            break;
        }
        match &data[index] {
            Value::Array(row_data) => {
                let row_data = row_data.borrow().clone();
                for (offset, col) in (range.c1..=range.c2).enumerate() {
                    if offset >= row_data.len() {
                        break;
                    }
                    put(&table, row, col, &row_data[offset], line)?;
                }
                index += 1;
            },
            _ => {
                for col in range.c1..=range.c2 {
                    if index >= data.len() {
                        break;
                    }
                    put(&table, row, col, &data[index], line)?;
                    index += 1;
                }
            },
        }
    }
    Ok(Value::Null)
}

/// `sao_chep_vùng(range)`: captures a rectangle of cell text into the
/// one-slot clipboard and returns it as a `{rows, height, width}` object.
pub fn copy_range(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let range = parse_a1(&range_text(&arg(&args, 0), line)?, line)?;

    let mut rows = Vec::new();
    for row in range.r1..=range.r2 {
        let mut cells = Vec::new();
        for col in range.c1..=range.c2 {
            cells.push(table.borrow().get_cell(row, col));
        }
        rows.push(cells);
    }
    let clipboard = Clipboard { rows };

    let mut snapshot = IndexMap::new();
    snapshot.insert("rows".to_string(),
                    Value::array(clipboard.rows
                                          .iter()
                                          .map(|cells| {
                                              Value::array(cells.iter()
                                                                .cloned()
                                                                .map(Value::Str)
                                                                .collect())
                                          })
                                          .collect()));
    snapshot.insert("height".to_string(),
                    Value::Number(clipboard.height() as f64));
    snapshot.insert("width".to_string(),
                    Value::Number(clipboard.width() as f64));

    rt.clipboard = Some(clipboard);
    Ok(Value::object(snapshot))
}

/// `dán_vùng(anchor)` or `dán_vùng(row, col)`: replays the clipboard at a
/// destination anchor. An empty clipboard is a silent no-op.
pub fn paste_range(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let (mut dest_row, mut dest_col) = (1usize, 1usize);
    match (args.first(), args.get(1)) {
        (Some(Value::Str(anchor)), _) => {
            let range = parse_a1(anchor, line)?;
            dest_row = range.r1;
            dest_col = range.c1;
        },
        (Some(Value::Number(row)), Some(Value::Number(col))) => {
            dest_row = num::index1_from_f64(*row).unwrap_or(1);
            dest_col = num::index1_from_f64(*col).unwrap_or(1);
        },
        _ => {},
    }

    let Some(clipboard) = rt.clipboard.clone() else {
        return Ok(Value::Null);
    };
    let table = rt.selected_table(line)?;
    for (i, cells) in clipboard.rows.iter().enumerate() {
        for (j, text) in cells.iter().enumerate() {
            table.borrow_mut().set_cell(dest_row + i, dest_col + j, text);
        }
    }
    Ok(Value::Null)
}
