#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// A line's indentation does not match any open indentation level.
    InvalidIndentation {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `chọn_bảng` was not followed by a string table name.
    ExpectedTableName {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The `gán` statement is missing the comma between target and value.
    ExpectedComma {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A required keyword (e.g. `từ`, `đến`) was not found.
    ExpectedKeyword {
        /// The missing keyword.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing bracket `]` was expected but not found.
    ExpectedClosingBracket {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An object literal entry is missing the `:` between key and value.
    ExpectedObjectColon {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `khác_nếu`/`nếu_không`/`khác` clause appeared outside an `nếu`.
    MisplacedElseClause {
        /// The clause keyword that was found.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndentation { line } => write!(f,
                                                        "Error on line {line}: Indentation does not match any outer block."),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::ExpectedTableName { line } => write!(f,
                                                       "Error on line {line}: chọn_bảng expects a string table name."),

            Self::ExpectedComma { line } => write!(f,
                                                   "Error on line {line}: gán expects a comma between target and value."),

            Self::ExpectedKeyword { keyword, line } => {
                write!(f, "Error on line {line}: Expected keyword '{keyword}'.")
            },

            Self::ExpectedClosingParen { line } => write!(f,
                                                          "Error on line {line}: Expected closing parenthesis ')' but none found."),

            Self::ExpectedClosingBracket { line } => write!(f,
                                                            "Error on line {line}: Expected closing bracket ']' but none found."),

            Self::ExpectedObjectColon { line } => write!(f,
                                                         "Error on line {line}: Expected ':' between object key and value."),

            Self::MisplacedElseClause { keyword, line } => write!(f,
                                                                  "Error on line {line}: '{keyword}' must follow an 'nếu' block."),
        }
    }
}

impl std::error::Error for ParseError {}
