//! Sources of random integers and the tag that says where they came from.

use std::future::{self, Future};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::allocator::{TICKET_MAX, TICKET_MIN};

/// Where a random value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The external true-random service.
    External,
    /// The local pseudo-random generator.
    Fallback,
}

/// A value tagged with its [`Source`], so a degraded draw stays visible to
/// callers and auditors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawn<T> {
    pub source: Source,
    pub value: T,
}

impl<T> Drawn<T> {
    pub fn external(value: T) -> Self {
        Self {
            source: Source::External,
            value,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            source: Source::Fallback,
            value,
        }
    }

    pub fn is_external(&self) -> bool {
        self.source == Source::External
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Drawn<U> {
        Drawn {
            source: self.source,
            value: f(self.value),
        }
    }
}

/// A provider of uniformly distributed integers.
///
/// Implementations must always produce exactly `n` values in `[min, max]`;
/// failures are absorbed and reported through the [`Source`] tag.
pub trait RandomSource: Send + Sync {
    fn integers(
        &self,
        n: usize,
        min: i64,
        max: i64,
    ) -> impl Future<Output = Drawn<Vec<i64>>> + Send;

    /// One integer in `[min, max]`.
    fn fetch_random_int(&self, min: i64, max: i64) -> impl Future<Output = Drawn<i64>> + Send {
        let (min, max) = ordered(min, max);
        async move {
            let drawn = self.integers(1, min, max).await;
            match drawn.value.first().copied() {
                Some(value) => drawn.map(|_| value),
                None => {
                    warn!(
                        source = ?drawn.source,
                        "random source returned no value, using local randomness"
                    );
                    Drawn::fallback(local_integer(min, max))
                }
            }
        }
    }

    /// `count` tickets in `[0, 99999]`, fetched in a single request.
    fn fetch_random_integer_batch(
        &self,
        count: usize,
    ) -> impl Future<Output = Drawn<Vec<i64>>> + Send {
        self.integers(count, TICKET_MIN, TICKET_MAX)
    }
}

/// Bounds in ascending order; reversed bounds are swapped.
pub(crate) fn ordered(min: i64, max: i64) -> (i64, i64) {
    if min <= max { (min, max) } else { (max, min) }
}

/// `n` uniform integers in `[min, max]` from the thread-local RNG.
///
/// Not cryptographically secure and not verifiable.
pub fn local_integers(n: usize, min: i64, max: i64) -> Vec<i64> {
    let (min, max) = ordered(min, max);
    let mut rng = rand::rng();
    (0..n).map(|_| rng.random_range(min..=max)).collect()
}

fn local_integer(min: i64, max: i64) -> i64 {
    let (min, max) = ordered(min, max);
    rand::rng().random_range(min..=max)
}

/// Local pseudo-random source. Every value it returns is tagged
/// [`Source::Fallback`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl RandomSource for LocalSource {
    fn integers(
        &self,
        n: usize,
        min: i64,
        max: i64,
    ) -> impl Future<Output = Drawn<Vec<i64>>> + Send {
        future::ready(Drawn::fallback(local_integers(n, min, max)))
    }
}
