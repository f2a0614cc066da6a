use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtins::arg,
            core::{EvalResult, Runtime},
        },
        table::TableHandle,
        value::{Value, parse_number},
    },
    util::num,
};

/// `ô(row, col)`: reads a cell's text. Positions below 1 or past the
/// current bounds read as the empty string.
pub fn cell(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    Ok(Value::Str(read_cell(&table,
                            arg(&args, 0).to_number(),
                            arg(&args, 1).to_number())))
}

/// Reads a cell through loose numeric coercion of the position.
pub(crate) fn read_cell(table: &TableHandle, row: f64, col: f64) -> String {
    match (num::index1_from_f64(row), num::index1_from_f64(col)) {
        (Some(r), Some(c)) => table.borrow().get_cell(r, c),
        _ => String::new(),
    }
}

/// `gán_ô(row, col, value)`: writes a cell, growing the table as needed.
pub fn assign_cell(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let row = arg(&args, 0);
    let col = arg(&args, 1);
    let value = arg(&args, 2);
    write_cell(rt, &row, &col, &value, line)?;
    Ok(Value::Null)
}

/// Writes one cell through to the selected table. Null writes as the empty
/// string; a row or column below 1 is an error.
pub(crate) fn write_cell(rt: &mut Runtime,
                         row: &Value,
                         col: &Value,
                         value: &Value,
                         line: usize)
                         -> EvalResult<()> {
    let table = rt.selected_table(line)?;
    let (Some(r), Some(c)) = (num::index1_from_f64(row.to_number()),
                              num::index1_from_f64(col.to_number()))
    else {
        return Err(RuntimeError::InvalidCellIndex { line });
    };
    let text = match value {
        Value::Null => String::new(),
        other => other.text(),
    };
    table.borrow_mut().set_cell(r, c, &text);
    Ok(())
}

/// `số_hàng()`: the selected table's row count.
pub fn row_count(rt: &mut Runtime, _args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let rows = table.borrow().row_count();
    Ok(Value::Number(rows as f64))
}

/// `số_cột()`: the selected table's column count.
pub fn col_count(rt: &mut Runtime, _args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let cols = table.borrow().col_count();
    Ok(Value::Number(cols as f64))
}

/// `thêm_hàng(pos?)`: inserts an empty row at the 1-indexed position, or
/// appends when no position is given.
pub fn insert_row(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    match args.first() {
        None | Some(Value::Null) => table.borrow_mut().insert_row(None),
        Some(value) => {
            let pos = num::f64_to_i64(value.to_number()).unwrap_or(0);
            let rows = table.borrow().row_count();
            if pos < 1 || pos as usize > rows + 1 {
                return Err(RuntimeError::RowOutOfBounds { pos, line });
            }
            table.borrow_mut().insert_row(Some(pos as usize));
        },
    }
    Ok(Value::Null)
}

/// `xóa_hàng(pos)`: deletes the row at the 1-indexed position.
pub fn delete_row(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let pos = num::f64_to_i64(arg(&args, 0).to_number()).unwrap_or(0);
    let rows = table.borrow().row_count();
    if pos < 1 || pos as usize > rows {
        return Err(RuntimeError::RowOutOfBounds { pos, line });
    }
    table.borrow_mut().delete_row(pos as usize);
    Ok(Value::Null)
}

/// `chèn_cột(pos)`: inserts an empty column at the 1-indexed position
/// across all rows.
pub fn insert_column(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let pos = num::f64_to_i64(arg(&args, 0).to_number()).unwrap_or(0);
    let cols = table.borrow().col_count();
    if pos < 1 || pos as usize > cols + 1 {
        return Err(RuntimeError::ColumnOutOfBounds { pos, line });
    }
    table.borrow_mut().insert_column(pos as usize);
    Ok(Value::Null)
}

/// `sắp_xếp(col, ascending)`: sorts all rows after the first by the given
/// column. Cells compare numerically when both parse as numbers, otherwise
/// lexicographically; the sort is stable. A truthy second argument sorts
/// ascending, anything else descending.
pub fn sort_rows(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let rows = table.borrow().row_count();
    if rows <= 1 {
        return Ok(Value::Null);
    }

    let col = num::index1_from_f64(arg(&args, 0).to_number());
    let ascending = arg(&args, 1).truthy();

    let key = |index: usize| -> String {
        match col {
            Some(c) => table.borrow().get_cell(index + 1, c),
            None => String::new(),
        }
    };

    let mut data: Vec<usize> = (1..rows).collect();
    data.sort_by(|a, b| {
            let ordering = compare_cells(&key(*a), &key(*b));
            if ascending { ordering } else { ordering.reverse() }
        });

    let mut order = Vec::with_capacity(rows);
    order.push(0);
    order.extend(data);
    table.borrow_mut().reorder_rows(&order);
    Ok(Value::Null)
}

/// Compares two cell texts: numerically when both parse, else as text.
fn compare_cells(a: &str, b: &str) -> Ordering {
    if let (Some(na), Some(nb)) = (parse_number(a), parse_number(b)) {
        return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
    }
    a.cmp(b)
}

/// `tổng(col)`: sums the numeric values of a column over all rows;
/// non-numeric cells contribute 0.
pub fn column_sum(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let table = rt.selected_table(line)?;
    let rows = table.borrow().row_count();
    let col = arg(&args, 0).to_number();

    let mut sum = 0.0;
    for row in 1..=rows {
        let text = read_cell(&table, row as f64, col);
        sum += parse_number(&text).unwrap_or(0.0);
    }
    Ok(Value::Number(sum))
}
