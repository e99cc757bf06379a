//! UUID generators and the strategies they compute fields with.

use crate::{
    bits, library, Error, GeneratorCapacities, ParameterDescription, Rfc4122Uuid, UuidRequirements,
};
use rand::SeedableRng;
use std::fmt;

mod name_based;
pub use name_based::NameHasher;

pub mod with_rand08;

/// A generator that declares what it can produce and produces it on demand.
///
/// Callers must only call [`generate_uuid`](UuidGenerator::generate_uuid) after
/// [`GeneratorCapacities::fulfill_requirements`] accepted the requirements. An error after that
/// check reveals an inconsistency in the generator itself, and a [`UuidFactory`] drops generators
/// that fail this way.
///
/// [`UuidFactory`]: crate::UuidFactory
pub trait UuidGenerator: Send {
    fn capacities(&self) -> &GeneratorCapacities;

    fn generate_uuid(&mut self, requirements: &UuidRequirements) -> Result<Rfc4122Uuid, Error>;
}

/// A trait that defines the minimum random number generator interface for the random strategy.
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// Draws `width` independent uniformly distributed bits.
pub fn draw_bits<R: RandSource + ?Sized>(source: &mut R, width: u32) -> u128 {
    let mut value = 0u128;
    let mut remaining = width.min(u128::BITS);
    while remaining > 0 {
        let take = remaining.min(u64::BITS);
        value = (value << take) | (source.next_u64() as u128 & bits::mask(take));
        remaining -= take;
    }
    value
}

/// How a generator computes the fields of a UUID.
pub enum Strategy {
    /// Fills every field with random bits and marks the UUID as version 4.
    Random(Box<dyn RandSource + Send>),

    /// Slices the hash of the namespace followed by the name into the fields.
    NameBased {
        hasher: NameHasher,
        namespace: Option<String>,
    },
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random(_) => f.write_str("Random"),
            Self::NameBased { hasher, namespace } => f
                .debug_struct("NameBased")
                .field("hasher", hasher)
                .field("namespace", namespace)
                .finish(),
        }
    }
}

/// Represents an RFC 4122 generator: declared capacities plus the strategy that fills the fields.
///
/// Every generator declares the `rfc4122` tag, the version-specific `rfc4122v{N}` tag, and an
/// optional `size` parameter that only accepts 128.
///
/// # Examples
///
/// ```rust
/// use uuid_factory::{library, Rfc4122Generator, UuidGenerator, UuidRequirements};
///
/// let mut g = Rfc4122Generator::md5_name(Some("example.com"))?;
/// let mut requirements = UuidRequirements::new();
/// library::request_name(&mut requirements, "foo");
///
/// assert!(g.capacities().fulfill_requirements(&requirements));
/// let uuid = g.generate_uuid(&requirements)?;
/// assert_eq!(uuid.version(), 3);
/// assert_eq!(uuid.to_string(), "c9b6267a-0758-348f-90ed-b94ee0d4eed6");
/// # Ok::<(), uuid_factory::Error>(())
/// ```
#[derive(Debug)]
pub struct Rfc4122Generator {
    capacities: GeneratorCapacities,
    strategy: Strategy,
}

impl Rfc4122Generator {
    /// Tag declared by random generators.
    pub const TAG_RFC4122_RANDOM_UUID: &'static str = "Rfc4122_v4";

    /// Creates a random (version 4) generator seeded from the operating system.
    pub fn random() -> Result<Self, Error> {
        Self::random_with(with_rand08::Adapter(rand_chacha::ChaCha12Rng::from_entropy()))
    }

    /// Creates a random (version 4) generator drawing bits from `source`.
    pub fn random_with(source: impl RandSource + Send + 'static) -> Result<Self, Error> {
        let mut capacities = Self::rfc4122_capacities(Rfc4122Uuid::VERSION_RANDOM)?;
        capacities.add_tag(Self::TAG_RFC4122_RANDOM_UUID);
        Ok(Self {
            capacities,
            strategy: Strategy::Random(Box::new(source)),
        })
    }

    /// Creates a name-based generator that hashes with MD5 (version 3).
    ///
    /// Without a default `namespace`, requirements must supply one.
    pub fn md5_name(namespace: Option<&str>) -> Result<Self, Error> {
        Self::name_based(NameHasher::MD5, namespace)
    }

    /// Creates a name-based generator that hashes with SHA-1 (version 5).
    ///
    /// Without a default `namespace`, requirements must supply one.
    #[cfg(feature = "sha1")]
    #[cfg_attr(docsrs, doc(cfg(feature = "sha1")))]
    pub fn sha1_name(namespace: Option<&str>) -> Result<Self, Error> {
        Self::name_based(NameHasher::SHA1, namespace)
    }

    /// Creates a name-based generator with any hasher.
    ///
    /// Fails with [`Error::Configuration`] if the hasher's version is not an RFC 4122 version.
    pub fn name_based(hasher: NameHasher, namespace: Option<&str>) -> Result<Self, Error> {
        if !Rfc4122Uuid::is_valid_version(hasher.version()) {
            return Err(Error::configuration(format!(
                "hasher version {} is not an RFC 4122 version",
                hasher.version()
            )));
        }

        let mut capacities = Self::rfc4122_capacities(hasher.version())?;
        library::allow_name(&mut capacities, true);
        library::allow_namespace(&mut capacities, namespace.is_none());
        Ok(Self {
            capacities,
            strategy: Strategy::NameBased {
                hasher,
                namespace: namespace.map(str::to_owned),
            },
        })
    }

    /// Declares an extra tag before the generator is put to use.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.capacities.add_tag(tag);
        self
    }

    /// Declares an extra parameter before the generator is put to use.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        description: impl Into<ParameterDescription>,
        required: bool,
    ) -> Self {
        self.capacities.add_parameter(name, description, required);
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    fn rfc4122_capacities(version: u8) -> Result<GeneratorCapacities, Error> {
        let mut capacities = GeneratorCapacities::new();
        library::allow_rfc4122(&mut capacities, Some(version.into()))?;
        library::allow_size(
            &mut capacities,
            library::SizeOptions {
                values: Some(vec![Rfc4122Uuid::INTEGER_SIZE.into()]),
                required: false,
                ..Default::default()
            },
        )?;
        Ok(capacities)
    }
}

impl UuidGenerator for Rfc4122Generator {
    fn capacities(&self) -> &GeneratorCapacities {
        &self.capacities
    }

    fn generate_uuid(&mut self, requirements: &UuidRequirements) -> Result<Rfc4122Uuid, Error> {
        match &mut self.strategy {
            Strategy::Random(source) => Rfc4122Uuid::new(
                draw_bits(source.as_mut(), Rfc4122Uuid::TIMESTAMP_BIT_NUMBER),
                draw_bits(source.as_mut(), Rfc4122Uuid::CLOCK_SEQUENCE_BIT_NUMBER),
                draw_bits(source.as_mut(), Rfc4122Uuid::NODE_ID_BIT_NUMBER),
                Rfc4122Uuid::VERSION_RANDOM,
            ),
            Strategy::NameBased { hasher, namespace } => {
                let name = library::extract_name(requirements)?;
                let namespace = match library::extract_namespace(requirements) {
                    Ok(namespace) => namespace,
                    Err(err) => namespace.as_deref().ok_or(err)?,
                };
                hasher.generate(namespace, name)
            }
        }
    }
}
