// Speedup - parallel search benchmark result reduction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for CSV reading and writing.

use thiserror::Error;

/// CSV error types.
///
/// Malformed rows of a per-sample file are not errors: they become
/// diagnostics and the row is skipped. These variants cover failures that
/// make a whole file unusable.
///
/// # Examples
///
/// ```
/// use speedup_csv::CsvError;
///
/// let err = CsvError::InvalidHeader {
///     expected: "variant,t,a,25,median,75".to_string(),
///     actual: "variant,t,a,median".to_string(),
/// };
/// assert!(err.to_string().contains("expected 'variant,t,a,25,median,75'"));
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// A row of a derived statistics file could not be read.
    ///
    /// ```
    /// use speedup_csv::CsvError;
    ///
    /// let err = CsvError::ParseError {
    ///     line: 42,
    ///     message: "invalid t 'x': not a positive integer".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// The header row does not match the expected columns.
    #[error("Invalid header: expected '{expected}', found '{actual}'")]
    InvalidHeader {
        /// Expected header, comma separated.
        expected: String,
        /// Header found in the input.
        actual: String,
    },

    /// Input exceeds the configured row limit.
    #[error("Security limit exceeded: {actual} rows exceeds maximum of {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Rows seen when the limit was hit.
        actual: usize,
    },

    /// Invalid UTF-8 in CSV output.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// Where the invalid UTF-8 was produced.
        context: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = CsvError::ParseError {
            line: 3,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.to_string(), "CSV parse error at line 3: duplicate key");
    }

    #[test]
    fn test_security_limit_display() {
        let err = CsvError::SecurityLimit {
            limit: 10,
            actual: 11,
        };
        assert!(err.to_string().contains("maximum of 10"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CsvError = io.into();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
