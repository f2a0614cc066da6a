use indexmap::IndexMap;

use crate::interpreter::{
    evaluator::{
        builtins::arg,
        call::compile_callback,
        core::{EvalResult, Runtime},
    },
    value::Value,
};

/// Implicit parameter names for object expression callbacks.
const OBJECT_PARAMS: &[&str] = &["value", "key", "obj"];

/// `json_chuỗi(value)`: serializes a value to compact JSON text, or Null
/// for values with no JSON form (functions).
pub fn stringify(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(arg(&args, 0).to_json(0)
                    .map_or(Value::Null, |json| Value::Str(json.to_string())))
}

/// `json_phân_tích(text)`: parses JSON text into a value, or Null when
/// the text is not valid JSON. Non-string arguments are coerced to text
/// first.
pub fn parse(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let text = match args.first() {
        Some(Value::Str(s)) => s.clone(),
        Some(other) => other.text(),
        None => return Ok(Value::Null),
    };
    Ok(serde_json::from_str::<serde_json::Value>(&text).map_or(Value::Null, |json| {
                                                           Value::from_json(&json)
                                                       }))
}

/// `json_sao_chép(value)`: a structural deep copy.
pub fn clone_deep(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(arg(&args, 0).deep_clone())
}

/// `là_json(value)`: whether the value is an array or object.
pub fn is_json(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let structured = matches!(args.first(), Some(Value::Array(_) | Value::Object(_)));
    Ok(Value::Bool(structured))
}

/// `là_chuỗi_json(text)`: whether the text parses as JSON.
pub fn is_json_text(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let text = match args.first() {
        Some(Value::Str(s)) => s.clone(),
        Some(other) => other.text(),
        None => return Ok(Value::Bool(false)),
    };
    Ok(Value::Bool(serde_json::from_str::<serde_json::Value>(&text).is_ok()))
}

/// Walks a dotted path through objects (by key) and arrays (by index),
/// yielding Null as soon as the path leaves structured data.
pub(crate) fn get_by_path(value: &Value, path: &str) -> Value {
    let mut current = value.clone();
    for key in path.split('.') {
        current = match &current {
            Value::Object(map) => map.borrow().get(key).cloned().unwrap_or(Value::Null),
            Value::Array(items) => {
                let items = items.borrow();
                match key.parse::<usize>() {
                    Ok(index) if index < items.len() => items[index].clone(),
                    _ => Value::Null,
                }
            },
            _ => return Value::Null,
        };
    }
    current
}

/// `lấy_đường_dẫn(obj, path)`: dotted-path read.
pub fn get_path(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(get_by_path(&arg(&args, 0), &arg(&args, 1).text()))
}

/// `đặt_đường_dẫn(obj, path, value)`: dotted-path write.
///
/// Missing intermediate object keys are created as empty objects; array
/// segments must already be in bounds. Returns whether the write landed.
pub fn set_path(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let target = arg(&args, 0);
    let path = arg(&args, 1).text();
    let value = arg(&args, 2);

    if !(target.is_object() || target.is_array()) {
        return Ok(Value::Bool(false));
    }

    let keys: Vec<&str> = path.split('.').collect();
    let mut current = target;
    for key in &keys[..keys.len() - 1] {
        let next = match &current {
            Value::Object(map) => {
                let existing = map.borrow().get(*key).cloned();
                match existing {
                    Some(found @ (Value::Object(_) | Value::Array(_))) => found,
                    Some(Value::Null) | None => {
                        let fresh = Value::object(IndexMap::new());
                        map.borrow_mut().insert((*key).to_string(), fresh.clone());
                        fresh
                    },
                    Some(_) => return Ok(Value::Bool(false)),
                }
            },
            Value::Array(items) => {
                let items = items.borrow();
                match key.parse::<usize>() {
                    Ok(index) if index < items.len() => items[index].clone(),
                    _ => return Ok(Value::Bool(false)),
                }
            },
            _ => return Ok(Value::Bool(false)),
        };
        if !(next.is_object() || next.is_array()) {
            return Ok(Value::Bool(false));
        }
        current = next;
    }

    let last = keys[keys.len() - 1];
    match &current {
        Value::Object(map) => {
            map.borrow_mut().insert(last.to_string(), value);
            Ok(Value::Bool(true))
        },
        Value::Array(items) => {
            let len = items.borrow().len();
            match last.parse::<usize>() {
                Ok(index) if index < len => {
                    items.borrow_mut()[index] = value;
                    Ok(Value::Bool(true))
                },
                _ => Ok(Value::Bool(false)),
            }
        },
        _ => Ok(Value::Bool(false)),
    }
}

/// `lọc_đối_tượng(obj, callback)`: a new object keeping the entries for
/// which the callback is truthy.
pub fn filter_object(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let Some(source @ Value::Object(map)) = args.first() else {
        return Ok(Value::object(IndexMap::new()));
    };
    let callback = compile_callback(&arg(&args, 1), OBJECT_PARAMS, line)?;
    let source = source.clone();
    let entries: Vec<(String, Value)> = map.borrow()
                                           .iter()
                                           .map(|(k, v)| (k.clone(), v.clone()))
                                           .collect();

    let mut out = IndexMap::new();
    for (key, value) in entries {
        let keep = rt.invoke_callback(&callback,
                                      &[value.clone(),
                                        Value::Str(key.clone()),
                                        source.clone()])?;
        if keep.truthy() {
            out.insert(key, value);
        }
    }
    Ok(Value::object(out))
}

/// `ánh_xạ_đối_tượng(obj, callback)`: a new object with every value
/// mapped through the callback.
pub fn map_object(rt: &mut Runtime, args: Vec<Value>, line: usize) -> EvalResult<Value> {
    let Some(source @ Value::Object(map)) = args.first() else {
        return Ok(Value::object(IndexMap::new()));
    };
    let callback = compile_callback(&arg(&args, 1), OBJECT_PARAMS, line)?;
    let source = source.clone();
    let entries: Vec<(String, Value)> = map.borrow()
                                           .iter()
                                           .map(|(k, v)| (k.clone(), v.clone()))
                                           .collect();

    let mut out = IndexMap::new();
    for (key, value) in entries {
        let mapped = rt.invoke_callback(&callback,
                                        &[value, Value::Str(key.clone()), source.clone()])?;
        out.insert(key, mapped);
    }
    Ok(Value::object(out))
}

/// `khóa(obj)`: the keys as an array (array arguments yield their index
/// strings).
pub fn keys(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(match args.first() {
        Some(Value::Object(map)) => {
            Value::array(map.borrow()
                            .keys()
                            .map(|key| Value::Str(key.clone()))
                            .collect())
        },
        Some(Value::Array(items)) => {
            Value::array((0..items.borrow().len()).map(|index| Value::Str(index.to_string()))
                                                  .collect())
        },
        _ => Value::array(Vec::new()),
    })
}

/// `giá_trị(obj)`: the values as an array.
pub fn values(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(match args.first() {
        Some(Value::Object(map)) => Value::array(map.borrow().values().cloned().collect()),
        Some(Value::Array(items)) => Value::array(items.borrow().clone()),
        _ => Value::array(Vec::new()),
    })
}

/// `mục(obj)`: the entries as an array of `[key, value]` pairs.
pub fn entries(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    Ok(match args.first() {
        Some(Value::Object(map)) => {
            Value::array(map.borrow()
                            .iter()
                            .map(|(key, value)| {
                                Value::array(vec![Value::Str(key.clone()), value.clone()])
                            })
                            .collect())
        },
        Some(Value::Array(items)) => {
            Value::array(items.borrow()
                              .iter()
                              .enumerate()
                              .map(|(index, value)| {
                                  Value::array(vec![Value::Str(index.to_string()), value.clone()])
                              })
                              .collect())
        },
        _ => Value::array(Vec::new()),
    })
}

/// `có_khóa(obj, key)`: key-presence test.
pub fn has_key(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let key = arg(&args, 1).text();
    let present = match args.first() {
        Some(Value::Object(map)) => map.borrow().contains_key(&key),
        Some(Value::Array(items)) => {
            key.parse::<usize>().is_ok_and(|index| index < items.borrow().len())
        },
        _ => false,
    };
    Ok(Value::Bool(present))
}

/// `có_giá_trị(obj, value)`: value-presence test with strict equality.
pub fn has_value(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let needle = arg(&args, 1);
    let present = match args.first() {
        Some(Value::Object(map)) => map.borrow().values().any(|value| value.strict_eq(&needle)),
        Some(Value::Array(items)) => items.borrow().iter().any(|value| value.strict_eq(&needle)),
        _ => false,
    };
    Ok(Value::Bool(present))
}
