use crate::bits;
use crate::error::{Error, ParseError};
use std::{cmp, fmt, hash, str, sync::OnceLock};

/// Represents an RFC 4122 Universally Unique IDentifier built from its time, clock sequence and
/// node fields.
///
/// Field values wider than their declared width are truncated to their low-order bits. The
/// canonical string and the 128-bit integer views are computed on first access and cached.
///
/// # Examples
///
/// ```rust
/// use uuid_factory::Rfc4122Uuid;
///
/// let uuid = Rfc4122Uuid::new(0x123_4567_89ab_cdef, 0x1234, 0x0123_4567_89ab, 2)?;
/// assert_eq!(uuid.to_string(), "89abcdef-4567-2123-9234-0123456789ab");
/// assert_eq!(uuid.to_urn(), "urn:uuid:89abcdef-4567-2123-9234-0123456789ab");
/// # Ok::<(), uuid_factory::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Rfc4122Uuid {
    timestamp: u64,
    clock_sequence: u16,
    node_id: u64,
    version: u8,

    string_repr: OnceLock<String>,
    raw_int: OnceLock<u128>,
}

impl Rfc4122Uuid {
    /// Time-based version.
    pub const VERSION_TIME_BASED: u8 = 1;

    /// DCE security version, with embedded POSIX UIDs.
    pub const VERSION_DCE_SECURITY: u8 = 2;

    /// Name-based version that uses MD5 hashing.
    pub const VERSION_NAME_BASED_MD5: u8 = 3;

    /// Randomly or pseudo-randomly generated version.
    pub const VERSION_RANDOM: u8 = 4;

    /// Name-based version that uses SHA-1 hashing.
    pub const VERSION_NAME_BASED_SHA1: u8 = 5;

    pub const TIMESTAMP_BIT_NUMBER: u32 = 60;
    pub const CLOCK_SEQUENCE_BIT_NUMBER: u32 = 14;
    pub const NODE_ID_BIT_NUMBER: u32 = 48;

    /// Number of bits of the integer representation.
    pub const INTEGER_SIZE: u32 = 128;

    /// The variant bits identifying the RFC 4122 layout.
    pub const LAYOUT: &'static str = "10";
    const LAYOUT_BITS: u128 = 0b10;

    const VERSIONS: [u8; 5] = [
        Self::VERSION_TIME_BASED,
        Self::VERSION_DCE_SECURITY,
        Self::VERSION_NAME_BASED_MD5,
        Self::VERSION_RANDOM,
        Self::VERSION_NAME_BASED_SHA1,
    ];

    /// Creates a UUID from its field values, keeping the low 60, 14 and 48 bits of `timestamp`,
    /// `clock_sequence` and `node_id` respectively.
    ///
    /// Returns [`Error::InvalidVersion`] unless `version` is one of the five RFC 4122 versions.
    pub fn new(
        timestamp: u128,
        clock_sequence: u128,
        node_id: u128,
        version: u8,
    ) -> Result<Self, Error> {
        if !Self::is_valid_version(version) {
            return Err(Error::InvalidVersion(version));
        }

        Ok(Self {
            timestamp: (timestamp & bits::mask(Self::TIMESTAMP_BIT_NUMBER)) as u64,
            clock_sequence: (clock_sequence & bits::mask(Self::CLOCK_SEQUENCE_BIT_NUMBER)) as u16,
            node_id: (node_id & bits::mask(Self::NODE_ID_BIT_NUMBER)) as u64,
            version,
            string_repr: OnceLock::new(),
            raw_int: OnceLock::new(),
        })
    }

    /// Tells whether `version` is one of the five RFC 4122 versions.
    pub fn is_valid_version(version: u8) -> bool {
        Self::VERSIONS.contains(&version)
    }

    /// Recovers the fields from a 128-bit integer representation.
    ///
    /// Fails if the variant bits are not `10` or the version nibble is not an RFC 4122 version.
    pub fn from_raw_int(src: u128) -> Result<Self, ParseError> {
        const ERR: ParseError = ParseError {};

        let node_id = bits::extract_slice(src, 0, Some(48));
        let clock_seq_and_variant = bits::extract_slice(src, 48, Some(16));
        let time_high_and_version = bits::extract_slice(src, 64, Some(16));
        let time_mid = bits::extract_slice(src, 80, Some(16));
        let time_low = bits::extract_slice(src, 96, Some(32));

        if bits::extract_slice(clock_seq_and_variant, 14, None) != Self::LAYOUT_BITS {
            return Err(ERR);
        }
        let version = bits::extract_slice(time_high_and_version, 12, None) as u8;
        let timestamp =
            (bits::extract_slice(time_high_and_version, 0, Some(12)) << 48) | (time_mid << 32) | time_low;

        Self::new(timestamp, clock_seq_and_variant, node_id, version).map_err(|_| ERR)
    }

    /// Returns the 60-bit timestamp field.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the 14-bit clock sequence field.
    pub const fn clock_sequence(&self) -> u16 {
        self.clock_sequence
    }

    /// Returns the 48-bit node id field.
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Returns the variant bits, always `"10"`.
    pub const fn variant(&self) -> &'static str {
        Self::LAYOUT
    }

    pub const fn raw_int_bit_number(&self) -> u32 {
        Self::INTEGER_SIZE
    }

    /// Returns the URN form, `urn:uuid:` followed by the canonical string.
    pub fn to_urn(&self) -> String {
        format!("urn:uuid:{}", self.as_str())
    }

    /// Returns the 128-bit integer whose bits follow the RFC 4122 field order.
    pub fn to_raw_int(&self) -> u128 {
        *self.raw_int.get_or_init(|| {
            let groups = [
                (self.time_low(), 32),
                (self.time_mid(), 16),
                (self.time_high_and_version(), 16),
                (self.clock_seq_and_variant(), 16),
                (self.node_id as u128, 48),
            ];
            groups.iter().fold(0, |acc, &(value, width)| {
                debug_assert!(bits::fits(value, width));
                (acc << width) | value
            })
        })
    }

    /// Returns the 16-byte big-endian representation.
    pub fn as_bytes(&self) -> [u8; 16] {
        self.to_raw_int().to_be_bytes()
    }

    /// Returns the cached 8-4-4-4-12 canonical hexadecimal string representation.
    pub fn as_str(&self) -> &str {
        self.string_repr.get_or_init(|| {
            format!(
                "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
                self.time_low(),
                self.time_mid(),
                self.time_high_and_version(),
                self.clock_seq_and_variant(),
                self.node_id,
            )
        })
    }

    fn time_low(&self) -> u128 {
        bits::extract_slice(self.timestamp as u128, 0, Some(32))
    }

    fn time_mid(&self) -> u128 {
        bits::extract_slice(self.timestamp as u128, 32, Some(16))
    }

    fn time_high_and_version(&self) -> u128 {
        bits::set_high_bits(
            bits::extract_slice(self.timestamp as u128, 48, None),
            self.version as u128,
            4,
            15,
        )
    }

    fn clock_seq_and_variant(&self) -> u128 {
        bits::set_high_bits(self.clock_sequence as u128, Self::LAYOUT_BITS, 2, 15)
    }

    fn fields(&self) -> (u64, u16, u64, u8) {
        (self.timestamp, self.clock_sequence, self.node_id, self.version)
    }
}

impl PartialEq for Rfc4122Uuid {
    fn eq(&self, other: &Self) -> bool {
        self.fields() == other.fields()
    }
}

impl Eq for Rfc4122Uuid {}

impl hash::Hash for Rfc4122Uuid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.fields().hash(state);
    }
}

impl PartialOrd for Rfc4122Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rfc4122Uuid {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.to_raw_int().cmp(&other.to_raw_int())
    }
}

impl fmt::Display for Rfc4122Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Rfc4122Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = 0u128;
        let mut iter = src.chars();
        for i in 0..32 {
            dst = (dst << 4) | iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u128;
            if (i == 7 || i == 11 || i == 15 || i == 19) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Self::from_raw_int(dst)
        } else {
            Err(ERR)
        }
    }
}

impl From<Rfc4122Uuid> for String {
    fn from(src: Rfc4122Uuid) -> Self {
        src.to_string()
    }
}

impl From<Rfc4122Uuid> for u128 {
    fn from(src: Rfc4122Uuid) -> Self {
        src.to_raw_int()
    }
}

impl From<Rfc4122Uuid> for [u8; 16] {
    fn from(src: Rfc4122Uuid) -> Self {
        src.as_bytes()
    }
}

impl TryFrom<u128> for Rfc4122Uuid {
    type Error = ParseError;

    fn try_from(src: u128) -> Result<Self, Self::Error> {
        Self::from_raw_int(src)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Rfc4122Uuid;

    impl From<Rfc4122Uuid> for uuid::Uuid {
        fn from(src: Rfc4122Uuid) -> Self {
            uuid::Uuid::from_u128(src.to_raw_int())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Rfc4122Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Rfc4122Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(self.as_str())
            } else {
                serializer.serialize_bytes(&self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Rfc4122Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Rfc4122Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "an RFC 4122 UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            let bytes = <[u8; 16]>::try_from(value).map_err(de::Error::custom)?;
            Rfc4122Uuid::from_raw_int(u128::from_be_bytes(bytes)).map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::Rfc4122Uuid;
    use crate::{bits, Error};

    const MAX_UINT60: u128 = (1 << 60) - 1;
    const MAX_UINT14: u128 = (1 << 14) - 1;
    const MAX_UINT48: u128 = (1 << 48) - 1;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u128, u128, u128, u8), &'static str)] {
        &[
            ((0, 0, 0, 4), "00000000-0000-4000-8000-000000000000"),
            ((MAX_UINT60, 0, 0, 1), "ffffffff-ffff-1fff-8000-000000000000"),
            ((0, MAX_UINT14, 0, 3), "00000000-0000-3000-bfff-000000000000"),
            ((0, 0, MAX_UINT48, 5), "00000000-0000-5000-8000-ffffffffffff"),
            (
                (MAX_UINT60, MAX_UINT14, MAX_UINT48, 4),
                "ffffffff-ffff-4fff-bfff-ffffffffffff",
            ),
            (
                (0x123_4567_89ab_cdef, 0x1234, 0x0123_4567_89ab, 2),
                "89abcdef-4567-2123-9234-0123456789ab",
            ),
        ]
    }

    /// Encodes prepared cases correctly
    #[test]
    fn encodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let e = Rfc4122Uuid::new(fs.0, fs.1, fs.2, fs.3).unwrap();
            assert_eq!(&e.to_string(), text);
            assert_eq!(e.to_urn(), format!("urn:uuid:{}", text));
            assert_eq!(e.version(), fs.3);
        }
    }

    /// Produces a canonical string and URN
    #[test]
    fn produces_a_canonical_string_and_urn() {
        let re = regex::Regex::new(r"^[0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12}$").unwrap();
        for (fs, _) in prepare_cases() {
            let e = Rfc4122Uuid::new(fs.0, fs.1, fs.2, fs.3).unwrap();
            assert!(re.is_match(&e.to_string()));
            assert_eq!(e.to_urn(), "urn:uuid:".to_owned() + &e.to_string());
        }
    }

    /// Slices the raw integer back into the same hex groups
    #[test]
    fn slices_the_raw_integer_back_into_the_same_hex_groups() {
        for (fs, text) in prepare_cases() {
            let e = Rfc4122Uuid::new(fs.0, fs.1, fs.2, fs.3).unwrap();
            let raw = e.to_raw_int();
            let groups = [(96, 32), (80, 16), (64, 16), (48, 16), (0, 48)]
                .iter()
                .map(|&(offset, width)| {
                    format!(
                        "{:0w$x}",
                        bits::extract_slice(raw, offset, Some(width)),
                        w = width as usize / 4
                    )
                })
                .collect::<Vec<_>>();
            assert_eq!(&groups.join("-"), text);
            assert_eq!(e.raw_int_bit_number(), 128);
        }
    }

    /// Returns cached views on repeated calls
    #[test]
    fn returns_cached_views_on_repeated_calls() {
        let e = Rfc4122Uuid::new(0x123_4567_89ab_cdef, 0x1234, 0x0123_4567_89ab, 2).unwrap();
        let first = e.as_str().as_ptr();
        assert_eq!(e.to_string(), e.to_string());
        assert_eq!(e.as_str().as_ptr(), first);
        assert_eq!(e.to_raw_int(), e.to_raw_int());
    }

    /// Truncates oversized fields to their low-order bits
    #[test]
    fn truncates_oversized_fields_to_their_low_order_bits() {
        let e = Rfc4122Uuid::new(u128::MAX, u128::MAX, u128::MAX, 4).unwrap();
        assert_eq!(e.timestamp() as u128, MAX_UINT60);
        assert_eq!(e.clock_sequence() as u128, MAX_UINT14);
        assert_eq!(e.node_id() as u128, MAX_UINT48);
        assert_eq!(e.to_string(), "ffffffff-ffff-4fff-bfff-ffffffffffff");

        let e = Rfc4122Uuid::new(1 << 60 | 0xabc, 1 << 14 | 0x12, 1 << 48 | 0x34, 4).unwrap();
        assert_eq!(e.timestamp(), 0xabc);
        assert_eq!(e.clock_sequence(), 0x12);
        assert_eq!(e.node_id(), 0x34);
    }

    /// Always reports the RFC 4122 variant
    #[test]
    fn always_reports_the_rfc4122_variant() {
        for (fs, _) in prepare_cases() {
            let e = Rfc4122Uuid::new(fs.0, fs.1, fs.2, fs.3).unwrap();
            assert_eq!(e.variant(), "10");
            assert_eq!(e.to_raw_int() >> 62 & 0b11, 0b10);
        }
    }

    /// Rejects versions outside of the RFC 4122 set
    #[test]
    fn rejects_versions_outside_of_the_rfc4122_set() {
        for version in [0, 6, 7, 9, 15, 255] {
            assert_eq!(
                Rfc4122Uuid::new(0, 0, 0, version),
                Err(Error::InvalidVersion(version))
            );
        }
        for version in 1..=5 {
            assert!(Rfc4122Uuid::new(0, 0, 0, version).is_ok());
        }
    }

    /// Parses prepared cases back into the same fields
    #[test]
    fn parses_prepared_cases_back_into_the_same_fields() {
        for (fs, text) in prepare_cases() {
            let e = Rfc4122Uuid::new(fs.0, fs.1, fs.2, fs.3).unwrap();
            assert_eq!(text.parse(), Ok(e.clone()));
            assert_eq!(text.to_uppercase().parse(), Ok(e.clone()));
            assert_eq!(Rfc4122Uuid::try_from(u128::from(e.clone())), Ok(e.clone()));
            assert_eq!(<[u8; 16]>::from(e.clone()), e.to_raw_int().to_be_bytes());
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(e.clone()).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 2ca4b2ce-6c13-40d4-bccf-37d222820f6f",
            "2ca4b2ce-6c13-40d4-bccf-37d222820f6f ",
            "+2ca4b2ce-6c13-40d4-bccf-37d222820f6f",
            "2ca4b2ce6c1340d4bccf37d222820f6f",
            "2ca4b2ce-6c1340d4-bccf-37d222820f6f",
            "{2ca4b2ce-6c13-40d4-bccf-37d222820f6f}",
            "2ca4b2ce-6c13-40 4-bccf-37d222820f6f",
            "2ca4b2ge-6c13-40d4-bccf-37d222820f6f",
            "2ca4b2ce-6c13-40d4-bccf_37d222820f6f",
            "2ca4b2ce-6c13-70d4-bccf-37d222820f6f",
            "2ca4b2ce-6c13-00d4-bccf-37d222820f6f",
            "2ca4b2ce-6c13-40d4-cccf-37d222820f6f",
            "2ca4b2ce-6c13-40d4-3ccf-37d222820f6f",
        ];

        for e in cases {
            assert!(e.parse::<Rfc4122Uuid>().is_err(), "{}", e);
        }
    }
}
