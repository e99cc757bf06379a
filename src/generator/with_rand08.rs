//! Integration with `rand` (v0.8) crate.

use super::{RandSource, Rfc4122Generator};
use crate::Error;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }
}

impl Rfc4122Generator {
    /// Creates a random generator with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use uuid_factory::{Rfc4122Generator, UuidGenerator, UuidRequirements};
    ///
    /// let mut g = Rfc4122Generator::with_rand08(StdRng::seed_from_u64(42))?;
    /// let uuid = g.generate_uuid(&UuidRequirements::new())?;
    /// assert_eq!(uuid.version(), 4);
    /// # Ok::<(), uuid_factory::Error>(())
    /// ```
    pub fn with_rand08<T: RngCore + Send + 'static>(rng: T) -> Result<Self, Error> {
        Self::random_with(Adapter(rng))
    }
}
