//! Oxihuff: lossless Huffman compression of UTF-8 text in Rust.
//!
//! The crate provides:
//! - Huffman primitives: frequency counting, tree construction, code
//!   tables, bit sequences and a compact tree topology format (`huffman`)
//! - The self-describing artifact codec built on them (`codec`)
//! - File- and stream-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxihuff::codec;
//!
//! let artifact = codec::encode_str("abracadabra").unwrap();
//! assert_eq!(artifact.len(), 41);
//!
//! let text = codec::decode_to_string(&artifact).unwrap();
//! assert_eq!(text, "abracadabra");
//! ```

pub mod codec;
pub mod error;
pub mod huffman;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::CodecError;
