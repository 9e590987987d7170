//! Identity tokens that never compare equal to one another.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

// Created zeroed when the program starts and never reset, so tokens from `Unique::new` are
// distinct for the lifetime of the process.
static PROCESS_SOURCE: UniqueSource = UniqueSource::new();

/// An identity token. Tokens compare, order and hash by the integer they were issued with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unique(u64);

impl Unique {
    /// A token distinct from every token previously issued by the process-wide source.
    ///
    /// Tokens issued by separately constructed [`UniqueSource`]s are not coordinated with
    /// this one.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        PROCESS_SOURCE.next()
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Unique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A monotonic counter issuing [`Unique`] tokens, starting at 1.
///
/// ```rust
/// # use basis::UniqueSource;
/// let source = UniqueSource::new();
/// let a = source.next();
/// let b = source.next();
///
/// assert!(a < b);
/// assert_eq!(a.value(), 1);
/// ```
#[derive(Debug, Default)]
pub struct UniqueSource {
    issued: AtomicU64,
}

impl UniqueSource {
    pub const fn new() -> Self {
        UniqueSource {
            issued: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> Unique {
        let value = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(unique = value, "issued unique token");
        Unique(value)
    }
}
