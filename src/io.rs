// File-level helpers around the in-memory codec.
//
// Provides `compress_file()` / `decompress_file()` plus in-memory and
// stream-based variants, derived output names, and per-run statistics.
// Outputs are only written once the codec has succeeded.
// Optionally computes a SHA-256 digest of the plaintext (feature-gated
// behind `file-io`) so a compress/decompress pair can be compared.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "file-io")]
use sha2::Digest;
use thiserror::Error;

use crate::codec;
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `compress_file()`.
#[derive(Debug, Clone)]
pub struct CompressStats {
    /// Plaintext size in bytes.
    pub input_size: u64,
    /// Artifact size in bytes.
    pub output_size: u64,
    /// Symbols (Unicode scalar values) in the plaintext.
    pub symbol_count: u64,
    /// Distinct symbols.
    pub distinct_symbols: usize,
    /// Meaningful payload bits.
    pub payload_bits: u64,
    /// SHA-256 of the plaintext (if `file-io` feature is enabled).
    pub input_sha256: Option<[u8; 32]>,
}

impl CompressStats {
    /// Artifact size relative to plaintext size.
    pub fn ratio(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.output_size as f64 / self.input_size as f64
    }
}

/// Statistics returned by `decompress_file()`.
#[derive(Debug, Clone)]
pub struct DecompressStats {
    /// Artifact size in bytes.
    pub input_size: u64,
    /// Recovered plaintext size in bytes.
    pub output_size: u64,
    /// Symbols recovered.
    pub symbol_count: u64,
    /// SHA-256 of the recovered plaintext (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error type for file I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// I/O error (file open, read, write).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Codec error (encode, decode).
    #[error("{0}")]
    Codec(#[from] CodecError),
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

pub(crate) const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Derived output names
// ---------------------------------------------------------------------------

/// Default artifact path for `input`: the file name up to its first `.`,
/// plus `.enc`, in the same directory (`notes.txt` -> `notes.enc`).
pub fn compressed_path_for(input: &Path) -> PathBuf {
    with_stem_suffix(input, ".enc")
}

/// Default plaintext path for `artifact`: the file name up to its first
/// `.`, plus `_extracted.txt` (`notes.enc` -> `notes_extracted.txt`).
pub fn extracted_path_for(artifact: &Path) -> PathBuf {
    with_stem_suffix(artifact, "_extracted.txt")
}

fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    // Dot files keep their whole name.
    let stem = match name.find('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name.as_str(),
    };
    path.with_file_name(format!("{stem}{suffix}"))
}

// ---------------------------------------------------------------------------
// In-memory variants
// ---------------------------------------------------------------------------

/// Compress a plaintext buffer, returning the artifact and its stats.
///
/// Nothing is written anywhere; callers open their output only once this
/// has succeeded, so a failed run never leaves a partial artifact behind.
pub fn compress_bytes(input: &[u8]) -> Result<(Vec<u8>, CompressStats), IoError> {
    let text = std::str::from_utf8(input).map_err(CodecError::from)?;
    let (artifact, summary) = codec::encode_with_summary(text)?;

    let stats = CompressStats {
        input_size: input.len() as u64,
        output_size: artifact.len() as u64,
        symbol_count: summary.symbol_count,
        distinct_symbols: summary.distinct_symbols,
        payload_bits: summary.payload_bits,
        input_sha256: sha256(input),
    };
    Ok((artifact, stats))
}

/// Decompress an artifact buffer, returning the text and its stats.
pub fn decompress_bytes(artifact: &[u8]) -> Result<(String, DecompressStats), IoError> {
    let text = codec::decode_to_string(artifact)?;

    let stats = DecompressStats {
        input_size: artifact.len() as u64,
        output_size: text.len() as u64,
        symbol_count: text.chars().count() as u64,
        output_sha256: sha256(text.as_bytes()),
    };
    Ok((text, stats))
}

// ---------------------------------------------------------------------------
// Stream variants
// ---------------------------------------------------------------------------

/// Read all plaintext from `reader`, compress it, and write the artifact to
/// `writer`. Nothing reaches `writer` if compression fails.
pub fn compress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<CompressStats, IoError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let (artifact, stats) = compress_bytes(&input)?;
    writer.write_all(&artifact)?;
    writer.flush()?;
    Ok(stats)
}

/// Read a whole artifact from `reader`, decompress it, and write the
/// plaintext to `writer`. Nothing reaches `writer` if decoding fails.
pub fn decompress_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<DecompressStats, IoError> {
    let mut artifact = Vec::new();
    reader.read_to_end(&mut artifact)?;

    let (text, stats) = decompress_bytes(&artifact)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(stats)
}

// ---------------------------------------------------------------------------
// compress_file / decompress_file
// ---------------------------------------------------------------------------

/// Compress the text file at `input_path` into an artifact at `output_path`.
///
/// The whole input is read into memory and encoded before `output_path` is
/// created, so an existing file there survives a failed run.
pub fn compress_file(input_path: &Path, output_path: &Path) -> Result<CompressStats, IoError> {
    let input = read_all(input_path)?;
    let (artifact, stats) = compress_bytes(&input)?;
    write_all(output_path, &artifact)?;
    Ok(stats)
}

/// Decompress the artifact at `input_path` into a text file at `output_path`.
///
/// As with `compress_file`, `output_path` is only touched after decoding
/// succeeds.
pub fn decompress_file(
    input_path: &Path,
    output_path: &Path,
) -> Result<DecompressStats, IoError> {
    let artifact = read_all(input_path)?;
    let (text, stats) = decompress_bytes(&artifact)?;
    write_all(output_path, text.as_bytes())?;
    Ok(stats)
}

fn read_all(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    BufReader::with_capacity(BUF_SIZE, File::open(path)?).read_to_end(&mut data)?;
    Ok(data)
}

fn write_all(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut out = BufWriter::with_capacity(BUF_SIZE, File::create(path)?);
    out.write_all(data)?;
    out.flush()
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
fn sha256(data: &[u8]) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(data).into())
}

#[cfg(not(feature = "file-io"))]
fn sha256(_data: &[u8]) -> Option<[u8; 32]> {
    None
}

/// Lowercase hex rendering of a digest.
pub fn hex_digest(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
