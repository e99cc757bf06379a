use crate::{bits, Error, Rfc4122Uuid};
use std::fmt;

/// Hash function of a name-based generator together with the UUID version it produces.
///
/// The hash of the namespace followed by the name is read as an integer whose low-order 60 bits
/// become the timestamp, the next 14 bits the clock sequence, and the next 48 bits the node id.
#[derive(Clone, Copy)]
pub struct NameHasher {
    version: u8,
    hash: fn(&[u8]) -> u128,
}

impl NameHasher {
    /// MD5 hashing for version 3 UUIDs.
    pub const MD5: Self = Self::new(Rfc4122Uuid::VERSION_NAME_BASED_MD5, md5_hash);

    /// SHA-1 hashing for version 5 UUIDs.
    #[cfg(feature = "sha1")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha1")))]
    pub const SHA1: Self = Self::new(Rfc4122Uuid::VERSION_NAME_BASED_SHA1, sha1_hash);

    /// Creates a hasher from a function returning at least the low-order 122 bits of a digest.
    pub const fn new(version: u8, hash: fn(&[u8]) -> u128) -> Self {
        Self { version, hash }
    }

    pub const fn version(&self) -> u8 {
        self.version
    }

    pub fn hash(&self, full_name: &[u8]) -> u128 {
        (self.hash)(full_name)
    }

    /// Builds the UUID of `name` within `namespace`.
    pub fn generate(&self, namespace: &str, name: &str) -> Result<Rfc4122Uuid, Error> {
        let digest = self.hash(format!("{}{}", namespace, name).as_bytes());

        let clock_sequence_offset = Rfc4122Uuid::TIMESTAMP_BIT_NUMBER;
        let node_id_offset = clock_sequence_offset + Rfc4122Uuid::CLOCK_SEQUENCE_BIT_NUMBER;
        Rfc4122Uuid::new(
            bits::extract_slice(digest, 0, Some(Rfc4122Uuid::TIMESTAMP_BIT_NUMBER)),
            bits::extract_slice(
                digest,
                clock_sequence_offset,
                Some(Rfc4122Uuid::CLOCK_SEQUENCE_BIT_NUMBER),
            ),
            bits::extract_slice(digest, node_id_offset, Some(Rfc4122Uuid::NODE_ID_BIT_NUMBER)),
            self.version,
        )
    }
}

impl fmt::Debug for NameHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameHasher")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

fn md5_hash(full_name: &[u8]) -> u128 {
    u128::from_be_bytes(md5::compute(full_name).0)
}

/// Keeps the low-order 128 bits of the 160-bit digest.
#[cfg(feature = "sha1")]
fn sha1_hash(full_name: &[u8]) -> u128 {
    use sha1::{Digest, Sha1};

    let digest = Sha1::digest(full_name);
    let mut low = [0u8; 16];
    low.copy_from_slice(&digest[digest.len() - 16..]);
    u128::from_be_bytes(low)
}
