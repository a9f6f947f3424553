// Artifact header.
//
//   offset 0  u32 LE  topology byte length (T)
//   offset 4  u32 LE  total symbol count   (N)
//   offset 8  T bytes topology, then the packed payload to end of artifact

use crate::error::CodecError;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 8;

/// Parsed artifact header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Length of the topology section in bytes.
    pub topology_len: u32,
    /// Number of symbols in the original text.
    pub symbol_count: u32,
}

impl ArtifactHeader {
    /// Append the 8 header bytes to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.topology_len.to_le_bytes());
        out.extend_from_slice(&self.symbol_count.to_le_bytes());
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..4].copy_from_slice(&self.topology_len.to_le_bytes());
        out[4..].copy_from_slice(&self.symbol_count.to_le_bytes());
        out
    }

    /// Parse the header at the start of `artifact`.
    pub fn decode(artifact: &[u8]) -> Result<Self, CodecError> {
        let Some(bytes) = artifact.get(..HEADER_LEN) else {
            return Err(CodecError::MalformedHeader(format!(
                "artifact is {} bytes, header needs {HEADER_LEN}",
                artifact.len()
            )));
        };
        let (topology, count) = bytes.split_at(4);
        Ok(Self {
            topology_len: u32::from_le_bytes([topology[0], topology[1], topology[2], topology[3]]),
            symbol_count: u32::from_le_bytes([count[0], count[1], count[2], count[3]]),
        })
    }

    /// Split `artifact` into its topology and payload sections.
    ///
    /// Fails if the declared topology length runs past the end of the artifact.
    pub fn sections<'a>(&self, artifact: &'a [u8]) -> Result<(&'a [u8], &'a [u8]), CodecError> {
        let body = artifact.get(HEADER_LEN..).unwrap_or_default();
        let topology_len = self.topology_len as usize;
        if topology_len > body.len() {
            return Err(CodecError::MalformedHeader(format!(
                "topology length {topology_len} exceeds the {} bytes after the header",
                body.len()
            )));
        }
        Ok(body.split_at(topology_len))
    }
}
