use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::ast::FunctionDef;

/// Maximum nesting depth rendered or serialized before giving up.
/// Arrays and objects have reference semantics and can be made cyclic; the
/// guard keeps rendering total instead of recursing forever.
const MAX_RENDER_DEPTH: usize = 64;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. Arrays and
/// objects are shared behind `Rc<RefCell<..>>`, so aliases observe in-place
/// mutation; objects keep their keys in insertion order.
#[derive(Debug, Clone)]
pub enum Value {
    /// The null value, produced by undefined variables, missing arguments,
    /// and builtins without a result.
    Null,
    /// A numeric value (double precision floating-point).
    Number(f64),
    /// A string value.
    Str(String),
    /// A boolean value, produced by comparisons and the `không` operator.
    Bool(bool),
    /// An array of values with reference semantics.
    Array(Rc<RefCell<Vec<Self>>>),
    /// An insertion-ordered mapping from string keys to values.
    Object(Rc<RefCell<IndexMap<String, Self>>>),
    /// A reference to a user-defined function.
    Function(Rc<FunctionDef>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::array(v)
    }
}

impl Value {
    /// Wraps a vector of values into a shared array value.
    #[must_use]
    pub fn array(items: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(items)))
    }

    /// Wraps a map into a shared object value.
    #[must_use]
    pub fn object(map: IndexMap<String, Self>) -> Self {
        Self::Object(Rc::new(RefCell::new(map)))
    }

    /// Applies the language's truthiness coercion.
    ///
    /// Null is false; booleans are themselves; numbers are false iff exactly
    /// zero (so `NaN` is truthy); strings are false iff empty; arrays are
    /// false iff empty; objects and functions are always true.
    ///
    /// # Example
    /// ```
    /// use datable::interpreter::value::Value;
    ///
    /// assert!(Value::Number(2.0).truthy());
    /// assert!(!Value::Str(String::new()).truthy());
    /// assert!(!Value::Null.truthy());
    /// ```
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Array(items) => !items.borrow().is_empty(),
            Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Null and non-numeric values coerce to 0, booleans to 0/1, and strings
    /// are trimmed and parsed (empty string is 0, unparseable text is 0).
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            },
            Self::Str(s) => parse_number(s).unwrap_or(0.0),
            Self::Null | Self::Array(_) | Self::Object(_) | Self::Function(_) => 0.0,
        }
    }

    /// Returns the value's text form, as used by `==`, cell writes and
    /// string concatenation.
    ///
    /// Numbers with no fractional part print without a decimal point; arrays
    /// join their elements with `,` (null elements become empty); objects
    /// render as `[object Object]`.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_with_depth(0)
    }

    fn text_with_depth(&self, depth: usize) -> String {
        if depth > MAX_RENDER_DEPTH {
            return String::new();
        }
        match self {
            Self::Null => "null".to_string(),
            Self::Number(n) => format_number(*n),
            Self::Str(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Array(items) => items.borrow()
                                       .iter()
                                       .map(|item| match item {
                                           Self::Null => String::new(),
                                           other => other.text_with_depth(depth + 1),
                                       })
                                       .collect::<Vec<_>>()
                                       .join(","),
            Self::Object(_) => "[object Object]".to_string(),
            Self::Function(def) => format!("[hàm {}]", def.name),
        }
    }

    /// Returns the display form used by `hiển_thị`: arrays and objects are
    /// rendered as compact JSON, everything else via [`Value::text`].
    #[must_use]
    pub fn to_message(&self) -> String {
        match self {
            Self::Array(_) | Self::Object(_) => match self.to_json(0) {
                Some(json) => json.to_string(),
                None => self.text(),
            },
            other => other.text(),
        }
    }

    /// Strict equality: scalars compare by value, arrays/objects/functions
    /// by identity.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Converts the value to JSON.
    ///
    /// Returns `None` for function values and past the depth guard; array
    /// elements that cannot be serialized become JSON null, object entries
    /// are dropped. Whole numbers serialize without a fraction part.
    #[must_use]
    pub(crate) fn to_json(&self, depth: usize) -> Option<serde_json::Value> {
        if depth > MAX_RENDER_DEPTH {
            return None;
        }
        Some(match self {
            Self::Null => serde_json::Value::Null,
            Self::Number(n) => json_number(*n),
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Array(items) => {
                serde_json::Value::Array(items.borrow()
                                              .iter()
                                              .map(|item| {
                                                  item.to_json(depth + 1)
                                                      .unwrap_or(serde_json::Value::Null)
                                              })
                                              .collect())
            },
            Self::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, value) in map.borrow().iter() {
                    if let Some(json) = value.to_json(depth + 1) {
                        out.insert(key.clone(), json);
                    }
                }
                serde_json::Value::Object(out)
            },
            Self::Function(_) => return None,
        })
    }

    /// Builds a value from parsed JSON.
    #[must_use]
    pub(crate) fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Self::array(items.iter().map(Self::from_json).collect())
            },
            serde_json::Value::Object(map) => {
                let mut out = IndexMap::new();
                for (key, value) in map {
                    out.insert(key.clone(), Self::from_json(value));
                }
                Self::object(out)
            },
        }
    }

    /// Produces a structural copy: fresh arrays and objects all the way
    /// down, scalars and function references shared as-is.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        self.deep_clone_with_depth(0)
    }

    fn deep_clone_with_depth(&self, depth: usize) -> Self {
        if depth > MAX_RENDER_DEPTH {
            return Self::Null;
        }
        match self {
            Self::Array(items) => Self::array(items.borrow()
                                                   .iter()
                                                   .map(|item| item.deep_clone_with_depth(depth + 1))
                                                   .collect()),
            Self::Object(map) => {
                let mut out = IndexMap::new();
                for (key, value) in map.borrow().iter() {
                    out.insert(key.clone(), value.deep_clone_with_depth(depth + 1));
                }
                Self::object(out)
            },
            other => other.clone(),
        }
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Parses a string as a number the way the language's numeric coercion does.
///
/// The input is trimmed; an empty string is 0. Plain decimal and
/// scientific-notation forms are accepted; word spellings of special floats
/// (`inf`, `NaN`) are not.
///
/// # Example
/// ```
/// use datable::interpreter::value::parse_number;
///
/// assert_eq!(parse_number("  12.5 "), Some(12.5));
/// assert_eq!(parse_number(""), Some(0.0));
/// assert_eq!(parse_number("abc"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if !trimmed.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '+' | '-')) {
        return None;
    }
    if trimmed.chars()
              .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse().ok()
}

/// Formats a number in its canonical text form: whole values print without
/// a decimal point, non-finite values use the `NaN`/`Infinity` spellings.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

/// Converts a number to JSON, keeping whole values integral so they
/// serialize without a trailing `.0`. Non-finite numbers become JSON null.
fn json_number(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
