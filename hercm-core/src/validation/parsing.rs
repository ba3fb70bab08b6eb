//! Tokenizer and scalar parsing for HeRCM text
//!
//! This module provides pure parsing functions for header and body tokens
//! with no I/O dependencies. Failures are returned, never fatal.

/// A token that is not a valid scalar of the requested kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarError {
    /// Empty token
    Empty,
    /// Not a non-negative integer
    InvalidIndex,
    /// Not a floating point number
    InvalidValue,
}

/// Split a line into non-empty whitespace-separated tokens
///
/// Trailing `\r`/`\n` and runs of blanks never produce tokens.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split_ascii_whitespace()
}

/// Split a line on `delimiter`, dropping empty tokens
pub fn tokenize_on(line: &str, delimiter: char) -> impl Iterator<Item = &str> {
    line.trim_end_matches(|c| c == '\r' || c == '\n')
        .split(delimiter)
        .filter(|token| !token.is_empty())
}

/// Parse a non-negative integer such as a dimension or index
pub fn parse_index(token: &str) -> Result<usize, ScalarError> {
    if token.is_empty() {
        return Err(ScalarError::Empty);
    }
    token.parse::<usize>().map_err(|_| ScalarError::InvalidIndex)
}

/// Parse a single-precision matrix value
pub fn parse_value(token: &str) -> Result<f32, ScalarError> {
    if token.is_empty() {
        return Err(ScalarError::Empty);
    }
    token.parse::<f32>().map_err(|_| ScalarError::InvalidValue)
}

/// Parse a header verification sum
pub fn parse_verification(token: &str) -> Result<f64, ScalarError> {
    if token.is_empty() {
        return Err(ScalarError::Empty);
    }
    token.parse::<f64>().map_err(|_| ScalarError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let mut tokens = tokenize("  1.5   2 \t3\r\n");
        assert_eq!(tokens.next(), Some("1.5"));
        assert_eq!(tokens.next(), Some("2"));
        assert_eq!(tokens.next(), Some("3"));
        assert_eq!(tokens.next(), None);

        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   \n").count(), 0);
    }

    #[test]
    fn test_tokenize_on() {
        let mut tokens = tokenize_on("a,,b,c,\n", ',');
        assert_eq!(tokens.next(), Some("a"));
        assert_eq!(tokens.next(), Some("b"));
        assert_eq!(tokens.next(), Some("c"));
        assert_eq!(tokens.next(), None);

        // Only the delimiter separates tokens
        assert_eq!(tokenize_on("1 2  3", ' ').count(), 3);
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Ok(0));
        assert_eq!(parse_index("123"), Ok(123));

        // Invalid cases
        assert_eq!(parse_index(""), Err(ScalarError::Empty));
        assert_eq!(parse_index("abc"), Err(ScalarError::InvalidIndex));
        assert_eq!(parse_index("12a"), Err(ScalarError::InvalidIndex));
        assert_eq!(parse_index("-1"), Err(ScalarError::InvalidIndex));
        assert_eq!(parse_index("1.0"), Err(ScalarError::InvalidIndex));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1"), Ok(1.0));
        assert_eq!(parse_value("-2.5"), Ok(-2.5));
        assert_eq!(parse_value("1e3"), Ok(1000.0));

        assert_eq!(parse_value(""), Err(ScalarError::Empty));
        assert_eq!(parse_value("1.2.3"), Err(ScalarError::InvalidValue));
        assert_eq!(parse_value("x"), Err(ScalarError::InvalidValue));
    }

    #[test]
    fn test_parse_verification() {
        assert_eq!(parse_verification("7.0"), Ok(7.0));
        assert_eq!(parse_verification("0"), Ok(0.0));
        assert_eq!(parse_verification("?"), Err(ScalarError::InvalidValue));
    }
}
