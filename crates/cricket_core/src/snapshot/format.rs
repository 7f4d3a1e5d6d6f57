//! Binary snapshot layout: `lz4(size-prepended msgpack) || sha256`.

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

use super::error::SnapshotError;
use super::{MatchSnapshot, SNAPSHOT_VERSION};

const CHECKSUM_LEN: usize = 32;
/// lz4 size prefix plus the checksum.
const MIN_LEN: usize = 4 + CHECKSUM_LEN;

pub fn encode(snapshot: &MatchSnapshot) -> Result<Vec<u8>, SnapshotError> {
    let msgpack = to_vec_named(snapshot)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut out = compressed;
    out.extend_from_slice(&checksum);
    log::debug!("Encoded snapshot {}: {} -> {} bytes", snapshot.match_id, msgpack.len(), out.len());
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<MatchSnapshot, SnapshotError> {
    if bytes.len() < MIN_LEN {
        return Err(SnapshotError::Truncated { size: bytes.len() });
    }
    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    if hasher.finalize()[..] != *checksum {
        log::warn!("Snapshot checksum mismatch ({} bytes)", bytes.len());
        return Err(SnapshotError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SnapshotError::Decompression)?;
    let snapshot: MatchSnapshot = from_slice(&msgpack)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(snapshot)
}

/// Wall-clock unix milliseconds.
pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
