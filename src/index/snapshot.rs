//! Binary snapshots of an index.
//!
//! Layout (little endian):
//!
//! ```text
//! magic "SIFTSNAP" | version u32 | crc32 u32 | payload length u64 | payload
//! ```
//!
//! The payload is the bincode encoding of the index configuration followed by
//! the inverted index. The configuration travels with the data because an
//! index is only meaningful together with the analyzer that built it.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::index::config::IndexConfig;
use crate::index::inverted::InvertedIndex;
use crate::storage::Storage;

const MAGIC: &[u8; 8] = b"SIFTSNAP";
const FORMAT_VERSION: u32 = 1;
const HEADER_LEN: usize = 8 + 4 + 4 + 8;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    config: &'a IndexConfig,
    index: &'a InvertedIndex,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    config: IndexConfig,
    index: InvertedIndex,
}

/// Encode an index and its configuration into snapshot bytes.
pub fn encode(config: &IndexConfig, index: &InvertedIndex) -> Result<Vec<u8>> {
    let payload = bincode::serialize(&SnapshotRef { config, index })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and validate snapshot bytes.
pub fn decode(bytes: &[u8]) -> Result<(IndexConfig, InvertedIndex)> {
    if bytes.len() < HEADER_LEN {
        return Err(SiftError::serialization("snapshot is truncated"));
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);

    if &header[0..8] != MAGIC {
        return Err(SiftError::serialization("not a sift snapshot"));
    }
    let version = u32::from_le_bytes(read_array(&header[8..12]));
    if version != FORMAT_VERSION {
        return Err(SiftError::serialization(format!(
            "unsupported snapshot version {version} (expected {FORMAT_VERSION})"
        )));
    }
    let checksum = u32::from_le_bytes(read_array(&header[12..16]));
    let length = u64::from_le_bytes(read_array(&header[16..24]));

    if payload.len() as u64 != length {
        return Err(SiftError::serialization(format!(
            "snapshot payload is {} bytes, header says {length}",
            payload.len()
        )));
    }
    if crc32fast::hash(payload) != checksum {
        return Err(SiftError::serialization("snapshot checksum mismatch"));
    }

    let SnapshotOwned { config, index } = bincode::deserialize(payload)?;
    config.validate()?;
    index.check_consistency()?;
    Ok((config, index))
}

fn read_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut array = [0u8; N];
    array.copy_from_slice(slice);
    array
}

/// Write a snapshot under `name`.
pub fn write(
    storage: &dyn Storage,
    name: &str,
    config: &IndexConfig,
    index: &InvertedIndex,
) -> Result<u64> {
    let bytes = encode(config, index)?;
    let mut output = storage.create_output(name)?;
    output.write_all(&bytes)?;
    output.close()?;
    Ok(bytes.len() as u64)
}

/// Read the snapshot stored under `name`.
pub fn read(storage: &dyn Storage, name: &str) -> Result<(IndexConfig, InvertedIndex)> {
    let mut input = storage.open_input(name)?;
    let mut bytes = Vec::with_capacity(input.size()? as usize);
    input.read_to_end(&mut bytes)?;
    decode(&bytes)
}
