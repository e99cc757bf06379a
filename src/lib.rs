//! A pluggable UUID generation toolkit
//!
//! Generators declare what they can produce as [`GeneratorCapacities`]; callers describe what
//! they need as [`UuidRequirements`]; a [`UuidFactory`] hands the requirements to the
//! highest-priority generator able to satisfy them.
//!
//! ```rust
//! use uuid_factory::{library, Rfc4122Generator, UuidFactory, UuidRequirements};
//!
//! let mut factory = UuidFactory::with_defaults()?;
//! factory.add_generator(50, Rfc4122Generator::md5_name(Some("example.com"))?)?;
//!
//! let mut requirements = UuidRequirements::new();
//! library::request_rfc4122(&mut requirements, Some(4))?;
//! let uuid = factory.generate(&requirements)?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let mut requirements = UuidRequirements::new();
//! library::request_name(&mut requirements, "foo");
//! let uuid = factory.generate(&requirements)?;
//! assert_eq!(uuid.to_urn(), "urn:uuid:c9b6267a-0758-348f-90ed-b94ee0d4eed6");
//! # Ok::<(), uuid_factory::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! [`Rfc4122Uuid`] lays its fields out as in RFC 4122 section 4.1:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |     time_hi           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|  clock_seq                |         node (0-1)            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         node (2-5)                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - `time_low`, `time_mid` and `time_hi` hold bits 0-31, 32-47 and 48-59 of the 60-bit
//!   timestamp.
//! - The 4-bit `ver` field holds the version, 1 to 5.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` and 48-bit `node` fields hold the clock sequence and node id.
//!
//! Random generators fill the three fields with random bits. Name-based generators hash the
//! namespace followed by the name and slice the digest from its low-order bit upwards: 60 bits
//! of timestamp, then 14 bits of clock sequence, then 48 bits of node id.
//!
//! # Crate features
//!
//! - `sha1` (default): SHA-1 name-based generators.
//! - `serde`: serialization of [`Rfc4122Uuid`].
//! - `uuid`: conversion into `uuid::Uuid`.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bits;

mod error;
pub use error::{Error, ParseError};

mod rfc4122;
pub use rfc4122::Rfc4122Uuid;

mod parameter;
pub use parameter::{IntegerDescription, ParameterDescription, ParameterValue, StringDescription};

mod capacities;
pub use capacities::GeneratorCapacities;

mod requirements;
pub use requirements::UuidRequirements;

pub mod library;

pub mod generator;
#[doc(inline)]
pub use generator::{NameHasher, RandSource, Rfc4122Generator, UuidGenerator};

pub mod factory;
#[doc(inline)]
pub use factory::{FactoryHook, GeneratorId, TagFilterHook, UuidFactory};
