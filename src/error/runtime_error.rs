#[derive(Debug)]
/// Represents all errors that can occur during evaluation and runtime.
pub enum RuntimeError {
    /// A grid operation was invoked before any table was selected.
    NoTableSelected {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `chọn_bảng` could not resolve the given table id.
    UnknownTable {
        /// The table id that failed to resolve.
        id:   String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called an unknown function or builtin.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of an assignment is not a variable, index, or `ô(...)`
    /// call.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Index assignment was attempted on a value that is neither an array
    /// nor an object.
    InvalidIndexTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to an array element outside the current bounds.
    IndexOutOfBounds {
        /// The index that was requested.
        index: i64,
        /// The length of the array.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A cell write was addressed with a row or column below 1.
    InvalidCellIndex {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A row insert/delete position is outside the table.
    RowOutOfBounds {
        /// The requested 1-indexed row position.
        pos:  i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A column insert position is outside the table.
    ColumnOutOfBounds {
        /// The requested 1-indexed column position.
        pos:  i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An A1 cell or range reference could not be parsed.
    InvalidRange {
        /// The reference text as given.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A callback argument was neither a function value nor an expression
    /// string.
    InvalidCallback {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An expression-string callback failed to parse.
    InvalidCallbackExpression {
        /// The parse failure message.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTableSelected { line } => write!(f,
                                                     "Error on line {line}: No table is selected. Call chọn_bảng before using table operations."),

            Self::UnknownTable { id, line } => {
                write!(f, "Error on line {line}: No table found with id '{id}'.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function or builtin '{name}'.")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "Error on line {line}: Invalid assignment target.")
            },
            Self::InvalidIndexTarget { line } => write!(f,
                                                        "Error on line {line}: Index assignment requires an array or object."),

            Self::IndexOutOfBounds { index, len, line } => write!(f,
                                                                  "Error on line {line}: Index {index} is out of bounds for length {len}."),

            Self::InvalidCellIndex { line } => write!(f,
                                                      "Error on line {line}: Cell writes require a row and column of at least 1."),

            Self::RowOutOfBounds { pos, line } => {
                write!(f, "Error on line {line}: Row position {pos} is out of bounds.")
            },
            Self::ColumnOutOfBounds { pos, line } => {
                write!(f, "Error on line {line}: Column position {pos} is out of bounds.")
            },
            Self::InvalidRange { text, line } => {
                write!(f, "Error on line {line}: Invalid cell or range reference '{text}'.")
            },
            Self::InvalidCallback { line } => write!(f,
                                                     "Error on line {line}: Callback must be a function or an expression string."),

            Self::InvalidCallbackExpression { message, line } => {
                write!(f, "Error on line {line}: Invalid callback expression: {message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
