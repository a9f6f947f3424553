// Artifact codec: text <-> header + topology + packed payload.
//
// - `header`  — Fixed 8-byte artifact header
// - `encoder` — Frequency count, tree build, code packing
// - `decoder` — Topology rebuild, bit walk, artifact inspection
//
// The codec works on in-memory buffers only; reading and writing files is
// left to `crate::io` and the CLI.

pub mod decoder;
pub mod encoder;
pub mod header;

pub use decoder::{ArtifactSummary, decode, decode_to_string, inspect};
pub use encoder::{EncodeSummary, encode, encode_str, encode_with_summary};
pub use header::{ArtifactHeader, HEADER_LEN};
