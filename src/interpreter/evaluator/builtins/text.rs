use crate::interpreter::{
    evaluator::{
        builtins::arg,
        core::{EvalResult, Runtime},
    },
    value::Value,
};

/// `chia(text, separator?)`: splits text by a literal separator. An empty
/// (or missing) separator splits into individual characters. Null subjects
/// split into an empty array.
pub fn split(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let subject = match args.first() {
        None | Some(Value::Null) => return Ok(Value::array(Vec::new())),
        Some(value) => value.text(),
    };
    let separator = match args.get(1) {
        None => String::new(),
        Some(value) => value.text(),
    };

    let parts = if separator.is_empty() {
        subject.chars().map(|ch| Value::Str(ch.to_string())).collect()
    } else {
        subject.split(separator.as_str())
               .map(|part| Value::Str(part.to_string()))
               .collect()
    };
    Ok(Value::array(parts))
}

/// `thay_thế(text, search, replacement?)`: replaces every literal
/// occurrence of the search text. An empty search joins the characters
/// with the replacement; a Null subject replaces to the empty string.
pub fn replace(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    let subject = match args.first() {
        None | Some(Value::Null) => return Ok(Value::Str(String::new())),
        Some(value) => value.text(),
    };
    let search = arg(&args, 1).text();
    let replacement = match args.get(2) {
        None => String::new(),
        Some(value) => value.text(),
    };

    if search.is_empty() {
        let joined = subject.chars()
                            .map(|ch| ch.to_string())
                            .collect::<Vec<_>>()
                            .join(&replacement);
        return Ok(Value::Str(joined));
    }
    Ok(Value::Str(subject.replace(&search, &replacement)))
}

/// `đếm(subject, needle?)`: array length, or the number of
/// non-overlapping occurrences of the needle in the subject's text, or the
/// subject's character count when the needle is missing or empty.
pub fn count(_rt: &mut Runtime, args: Vec<Value>, _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(Value::Array(items)) => Ok(Value::Number(items.borrow().len() as f64)),
        None | Some(Value::Null) => Ok(Value::Number(0.0)),
        Some(value) => {
            let subject = value.text();
            let needle = match args.get(1) {
                None | Some(Value::Null) => String::new(),
                Some(value) => value.text(),
            };
            if needle.is_empty() {
                return Ok(Value::Number(subject.chars().count() as f64));
            }

            let mut count = 0;
            let mut pos = 0;
            while let Some(found) = subject[pos..].find(&needle) {
                count += 1;
                pos += found + needle.len();
            }
            Ok(Value::Number(f64::from(count)))
        },
    }
}
