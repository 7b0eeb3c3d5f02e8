use thiserror::Error;

/// Errors that can occur while reading from a ReadStream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// Attempted to read past the end of the buffer
    #[error("Unexpected end of stream: needed {needed} bytes at offset {offset}, but only {remaining} remain")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// An enum discriminant byte did not match any known variant
    #[error("Invalid {kind} tag {tag}")]
    InvalidTag { kind: &'static str, tag: u8 },

    /// String payload was not valid UTF-8
    #[error("String at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Nested payload exceeded the allowed depth
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}
