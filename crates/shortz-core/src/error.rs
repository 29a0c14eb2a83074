use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortzError {
    #[error("code table needs at least 2 tokens, got {count}")]
    TableTooSmall { count: usize },
    #[error("code table has no entry for the stop token")]
    MissingStopToken,
    #[error("duplicate token in code table: {token}")]
    DuplicateToken { token: String },
    #[error("code assignment would exceed {max} bits")]
    CodeOverflow { max: u32 },
    #[error("input byte 0x{byte:02x} has no code and no single-byte fallback")]
    Unencodable { byte: u8 },
    #[error("input contains the reserved stop byte 0x{byte:02x}")]
    ReservedByte { byte: u8 },
    #[error("compressed stream ended before the stop token was decoded")]
    TruncatedStream,
    #[error("compressed stream followed a bit path with no trie edge")]
    InvalidBitPath,
    #[error("malformed table file: {0}")]
    MalformedTable(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ShortzError>;
