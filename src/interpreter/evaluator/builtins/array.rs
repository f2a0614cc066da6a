use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            builtins::{arg, object::get_by_path},
            call::compile_callback,
            core::{EvalResult, Runtime},
        },
        value::Value,
    },
    util::num,
};

/// Implicit parameter names for per-element expression callbacks.
const ELEMENT_PARAMS: &[&str] = &["x", "i", "arr"];
/// Implicit parameter names for `gộp` (reduce) expression callbacks.
const REDUCE_PARAMS: &[&str] = &["total", "current", "i", "arr"];

/// Snapshots an array argument's elements; non-arrays snapshot as empty.
///
/// Builtins iterate the snapshot so a callback that mutates the array
/// mid-iteration cannot invalidate the traversal.
fn items_of(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.borrow().clone(),
        _ => Vec::new(),
    }
}

/// `ánh_xạ(arr, callback)`: maps each element through the callback.
pub fn map(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), ELEMENT_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        out.push(rt.invoke_callback(&callback,
                                    &[item.clone(), Value::Number(index as f64), source.clone()])?);
    }
    Ok(Value::array(out))
}

/// `lọc(arr, callback)`: keeps the elements for which the callback is
/// truthy.
pub fn filter(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), ELEMENT_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    let mut out = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let keep = rt.invoke_callback(&callback,
                                      &[item.clone(), Value::Number(index as f64), source.clone()])?;
        if keep.truthy() {
            out.push(item.clone());
        }
    }
    Ok(Value::array(out))
}

/// `gộp(arr, callback, initial)`: folds the elements left to right. The
/// accumulator starts at the initial value (Null when omitted).
pub fn reduce(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), REDUCE_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    let mut accumulator = arg(&args, 2);
    for (index, item) in items.iter().enumerate() {
        accumulator = rt.invoke_callback(&callback,
                                         &[accumulator.clone(),
                                           item.clone(),
                                           Value::Number(index as f64),
                                           source.clone()])?;
    }
    Ok(accumulator)
}

/// `tìm(arr, callback)`: the first element for which the callback is
/// truthy, or Null.
pub fn find(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), ELEMENT_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    for (index, item) in items.iter().enumerate() {
        let hit = rt.invoke_callback(&callback,
                                     &[item.clone(), Value::Number(index as f64), source.clone()])?;
        if hit.truthy() {
            return Ok(item.clone());
        }
    }
    Ok(Value::Null)
}

/// `một_số(arr, callback)`: whether the callback is truthy for any
/// element.
pub fn some(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), ELEMENT_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    for (index, item) in items.iter().enumerate() {
        let hit = rt.invoke_callback(&callback,
                                     &[item.clone(), Value::Number(index as f64), source.clone()])?;
        if hit.truthy() {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

/// `mọi(arr, callback)`: whether the callback is truthy for every
/// element.
pub fn every(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let callback = compile_callback(&arg(&args, 1), ELEMENT_PARAMS, line)?;
    let items = items_of(args.first());
    let source = arg(&args, 0);

    for (index, item) in items.iter().enumerate() {
        let hit = rt.invoke_callback(&callback,
                                     &[item.clone(), Value::Number(index as f64), source.clone()])?;
        if !hit.truthy() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

/// `sắp_xếp_mảng(arr, comparator?)`: returns a sorted copy.
///
/// With a function comparator, a numeric result orders by its sign and any
/// other result orders by truthiness (truthy puts the first argument
/// after the second). Without one, elements sort by their text form. The
/// sort is stable either way.
pub fn sort(rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let items = items_of(args.first());

    if let Some(Value::Function(def)) = args.get(1) {
        let def = std::rc::Rc::clone(def);
        // insertion keeps the sort stable while letting callback errors
        // propagate out of the comparison
        let mut sorted: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            let mut at = sorted.len();
            for (index, existing) in sorted.iter().enumerate() {
                let verdict = rt.call_function(&def, vec![item.clone(), existing.clone()])?;
                let before = match &verdict {
                    Value::Number(n) => *n < 0.0,
                    other => !other.truthy(),
                };
                if before {
                    at = index;
                    break;
                }
            }
            sorted.insert(at, item);
        }
        return Ok(Value::array(sorted));
    }

    let mut sorted = items;
    sorted.sort_by(|a, b| a.text().cmp(&b.text()));
    Ok(Value::array(sorted))
}

/// `làm_phẳng(arr, depth?)`: flattens nested arrays up to `depth` levels
/// (default 1). A depth of 0 or less returns the array unchanged.
pub fn flatten(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let Some(source @ Value::Array(items)) = args.first() else {
        return Ok(Value::array(Vec::new()));
    };
    let depth = match args.get(1) {
        None | Some(Value::Null) => 1,
        Some(value) => num::f64_to_i64(value.to_number()).unwrap_or(0),
    };
    if depth <= 0 {
        return Ok(source.clone());
    }
    // the depth cap bounds recursion even for cyclic arrays
    let depth = depth.min(64);

    fn flat(items: &[Value], depth: i64, out: &mut Vec<Value>) {
        for item in items {
            match item {
                Value::Array(inner) if depth > 0 => {
                    let inner = inner.borrow().clone();
                    flat(&inner, depth - 1, out);
                },
                other => out.push(other.clone()),
            }
        }
    }

    let snapshot = items.borrow().clone();
    let mut out = Vec::new();
    flat(&snapshot, depth, &mut out);
    Ok(Value::array(out))
}

/// `nhóm_theo(arr, key)`: groups elements into an object of arrays.
///
/// The key is either a function called per element or a key-path string
/// read from each element; the key value's text form names the group.
pub fn group_by(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let items = items_of(args.first());
    let key_source = arg(&args, 1);

    let mut groups: IndexMap<String, Vec<Value>> = IndexMap::new();
    for item in items {
        let key = match &key_source {
            Value::Str(path) => get_by_path(&item, path).text(),
            Value::Function(def) => rt.call_function(def, vec![item.clone()])?.text(),
            _ => return Err(RuntimeError::InvalidCallback { line }),
        };
        groups.entry(key).or_insert_with(Vec::new).push(item);
    }

    let mut out = IndexMap::new();
    for (key, members) in groups {
        out.insert(key, Value::array(members));
    }
    Ok(Value::object(out))
}

/// `nối(arr, arr, ...)`: concatenates the elements of every array
/// argument, in order. Non-array arguments are ignored.
pub fn concat(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let mut out = Vec::new();
    for value in &args {
        if let Value::Array(items) = value {
            out.extend(items.borrow().iter().cloned());
        }
    }
    Ok(Value::array(out))
}

/// `cắt(arr, start?, end?)`: a copy of the `[start, end)` element range.
/// Negative positions count from the end; a missing end means the array's
/// length.
pub fn slice(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let items = items_of(args.first());
    let len = items.len() as i64;

    let start = slice_bound(args.get(1), 0, len);
    let end = slice_bound(args.get(2), len, len);
    if start >= end {
        return Ok(Value::array(Vec::new()));
    }
    Ok(Value::array(items[start as usize..end as usize].to_vec()))
}

fn slice_bound(value: Option<&Value>, default: i64, len: i64) -> i64 {
    match value {
        None => default,
        Some(value) => {
            let n = num::f64_to_i64(value.to_number()).unwrap_or(0);
            if n < 0 { (len + n).max(0) } else { n.min(len) }
        },
    }
}

/// `thêm_vào_đầu(arr, item, ...)`: prepends items in place, returning the
/// array.
pub fn push_front(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => {
            let mut borrowed = items.borrow_mut();
            for (offset, item) in args.iter().skip(1).enumerate() {
                borrowed.insert(offset, item.clone());
            }
            drop(borrowed);
            Ok(args[0].clone())
        },
        _ => Ok(Value::array(args.iter().skip(1).cloned().collect())),
    }
}

/// `thêm_vào_cuối(arr, item, ...)`: appends items in place, returning the
/// array.
pub fn push_back(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => {
            items.borrow_mut().extend(args.iter().skip(1).cloned());
            Ok(args[0].clone())
        },
        _ => Ok(Value::array(args.iter().skip(1).cloned().collect())),
    }
}

/// `xóa_đầu(arr)`: removes and returns the first element (Null when
/// empty).
pub fn pop_front(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => {
            let mut borrowed = items.borrow_mut();
            if borrowed.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(borrowed.remove(0))
            }
        },
        _ => Ok(Value::Null),
    }
}

/// `xóa_cuối(arr)`: removes and returns the last element (Null when
/// empty).
pub fn pop_back(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => Ok(items.borrow_mut().pop().unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}

/// `chèn(arr, index, item, ...)`: inserts items at the position in place,
/// returning the array. The position clamps into range, counting from the
/// end when negative.
pub fn insert_at(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => {
            let mut borrowed = items.borrow_mut();
            let at = slice_bound(args.get(1), 0, borrowed.len() as i64) as usize;
            for (offset, item) in args.iter().skip(2).enumerate() {
                borrowed.insert(at + offset, item.clone());
            }
            drop(borrowed);
            Ok(args[0].clone())
        },
        _ => Ok(Value::array(args.iter().skip(2).cloned().collect())),
    }
}

/// `xóa_vị_trí(arr, index, count?)`: removes `count` elements (default 1)
/// at the position in place and returns the removed elements.
pub fn remove_at(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => {
            let mut borrowed = items.borrow_mut();
            let len = borrowed.len() as i64;
            let at = slice_bound(args.get(1), 0, len);
            let count = match args.get(2) {
                None | Some(Value::Null) => 1,
                Some(value) => num::f64_to_i64(value.to_number()).unwrap_or(0).max(0),
            };
            let end = at.saturating_add(count).min(len);
            let removed: Vec<Value> = borrowed.drain(at as usize..end as usize).collect();
            Ok(Value::array(removed))
        },
        _ => Ok(Value::array(Vec::new())),
    }
}

/// `chứa(arr, item, from?)`: whether the array contains a strictly equal
/// element at or after `from`.
pub fn contains(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let items = items_of(args.first());
    let needle = arg(&args, 1);
    let from = from_index(args.get(2));

    Ok(Value::Bool(items.iter()
                        .skip(from)
                        .any(|item| item.strict_eq(&needle))))
}

/// `vị_trí(arr, item, from?)`: the index of the first strictly equal
/// element at or after `from`, or -1.
pub fn index_of(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let items = items_of(args.first());
    let needle = arg(&args, 1);
    let from = from_index(args.get(2));

    for (index, item) in items.iter().enumerate().skip(from) {
        if item.strict_eq(&needle) {
            return Ok(Value::Number(index as f64));
        }
    }
    Ok(Value::Number(-1.0))
}

fn from_index(value: Option<&Value>) -> usize {
    match value {
        None | Some(Value::Null) => 0,
        Some(value) => num::index_from_f64(value.to_number()).unwrap_or(0),
    }
}

/// `tìm_kiếm(arr, value, exact?)`: recursively searches nested arrays for
/// elements whose text contains (or, with `exact`, equals) the search
/// value, case-insensitively. Returns `{value, path, index}` records.
pub fn search(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let Some(Value::Array(items)) = args.first() else {
        return Ok(Value::array(Vec::new()));
    };
    let needle = arg(&args, 1).text().to_lowercase();
    let exact = matches!(args.get(2), Some(Value::Bool(true)));

    fn walk(items: &[Value],
            path: &str,
            needle: &str,
            exact: bool,
            results: &mut Vec<Value>,
            depth: usize) {
        if depth > 64 {
            return;
        }
        for (index, item) in items.iter().enumerate() {
            let current = format!("{path}[{index}]");
            match item {
                Value::Array(inner) => {
                    let inner = inner.borrow().clone();
                    walk(&inner, &current, needle, exact, results, depth + 1);
                },
                other => {
                    let text = other.text().to_lowercase();
                    let found = if exact { text == needle } else { text.contains(needle) };
                    if found {
                        let mut record = IndexMap::new();
                        record.insert("value".to_string(), other.clone());
                        record.insert("path".to_string(), Value::Str(current.clone()));
                        record.insert("index".to_string(), Value::Number(index as f64));
                        results.push(Value::object(record));
                    }
                },
            }
        }
    }

    let snapshot = items.borrow().clone();
    let mut results = Vec::new();
    walk(&snapshot, "", &needle, exact, &mut results, 0);
    Ok(Value::array(results))
}
