use espec_codec::CodecError;

/// Errors that can occur while writing a container.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// A record failed to encode while building the container.
    #[error("failed to encode record {index}: {source}")]
    Encode {
        index: u64,
        #[source]
        source: CodecError,
    },
}

pub type Result<T> = std::result::Result<T, ContainerError>;
