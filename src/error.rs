// Error type shared by the Huffman primitives and the artifact codec.

use thiserror::Error;

use crate::huffman::bitseq::BitIndexError;

/// Failure of an encode, decode or inspect operation.
///
/// Every variant is terminal for the call that produced it: the codec is a
/// deterministic in-memory transform, so retrying cannot succeed.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The text to encode has no symbols.
    #[error("input contains no symbols")]
    EmptyInput,

    /// The topology section does not describe a valid tree.
    #[error("corrupt topology at byte {offset}: {reason}")]
    CorruptTopology { offset: usize, reason: String },

    /// The payload ran out of bits before the declared symbol count was reached.
    #[error("truncated payload: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { expected: u64, decoded: u64 },

    /// The artifact is too short for its header, or the header's lengths do
    /// not fit the artifact.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A count does not fit the artifact's 32-bit header fields.
    #[error("input too large: {0}")]
    InputTooLarge(String),

    /// A symbol of the text has no entry in the code table.
    ///
    /// Internal invariant guard: the encoder derives its table from the same
    /// text it packs, so a valid encode never returns this. It exists so the
    /// lookup fails as an error instead of a panic.
    #[error("symbol {0:?} has no code")]
    UnknownSymbol(char),

    #[error(transparent)]
    BitIndex(#[from] BitIndexError),
}
