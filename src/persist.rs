//! Versioned on-disk container for a [`DatasetBundle`].
//!
//! Layout: 8-byte magic, little-endian `u32` format version, then the
//! bincode encoding of the bundle. The header lets readers reject foreign
//! or future files before touching the payload.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use bincode::Options;

use crate::dataset::DatasetBundle;
use crate::error::{DatasetError, DatasetResult};

/// File signature.
pub const MAGIC: [u8; 8] = *b"ROLEFIX\0";

/// Current payload format.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = MAGIC.len() + 4;

/// Fixed-width little-endian integers; the payload must fill the file exactly.
fn payload_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode a bundle into header + payload bytes.
pub fn encode(bundle: &DatasetBundle) -> DatasetResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + 1024);
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    payload_options()
        .serialize_into(&mut bytes, bundle)
        .map_err(|e| DatasetError::Serialization {
            message: format!("failed to encode dataset bundle: {e}"),
        })?;
    Ok(bytes)
}

/// Decode bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> DatasetResult<DatasetBundle> {
    if bytes.len() < HEADER_LEN {
        return Err(DatasetError::Format {
            reason: format!("{} bytes is shorter than the {HEADER_LEN}-byte header", bytes.len()),
        });
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);
    if header[..MAGIC.len()] != MAGIC {
        return Err(DatasetError::Format {
            reason: "bad magic".into(),
        });
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&header[MAGIC.len()..]);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(DatasetError::Format {
            reason: format!("format version {version}, this build reads {FORMAT_VERSION}"),
        });
    }
    payload_options()
        .deserialize(payload)
        .map_err(|e| DatasetError::Serialization {
            message: format!("failed to decode dataset bundle: {e}"),
        })
}

/// Write `bundle` to `path`, creating or truncating the file.
///
/// The bundle is validated first; an invalid bundle is never written.
/// Returns the number of bytes written.
pub fn persist(bundle: &DatasetBundle, path: &Path) -> DatasetResult<u64> {
    bundle.validate()?;
    let bytes = encode(bundle)?;

    let io_err = |source: std::io::Error| DatasetError::Io {
        path: path.display().to_string(),
        source,
    };
    {
        let mut file = File::create(path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.flush().map_err(io_err)?;
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "persisted dataset bundle");
    Ok(bytes.len() as u64)
}

/// Read a bundle previously written by [`persist`].
pub fn load(path: &Path) -> DatasetResult<DatasetBundle> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let bundle = decode(&bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded dataset bundle");
    Ok(bundle)
}
