/// Errors that can occur during record encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Encoder input shape disagrees with the schema.
    #[error("schema mismatch in field {field}: expected {expected} elements, got {actual}")]
    SchemaMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A value exceeds the representable range of its unsigned-integer width.
    #[error("value {value} exceeds the range of a {width}-byte unsigned integer")]
    EncodingRange { value: u64, width: usize },

    /// A width/kind pair outside the supported set was requested.
    #[error("unsupported {kind} width: {width} bytes")]
    UnsupportedWidth { width: usize, kind: &'static str },

    /// The decoder ran out of bytes mid-field.
    #[error("input truncated while reading {field} element {element} at byte offset {offset}")]
    TruncatedInput {
        field: &'static str,
        element: usize,
        offset: usize,
    },

    /// Trailing unconsumed bytes after a full decode, or malformed hex input.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// An instant predates the Unix epoch and has no u64 millisecond form.
    #[error("timestamp predates the Unix epoch: {0}")]
    PreEpoch(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
