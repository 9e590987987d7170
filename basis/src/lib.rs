//! Functors, monads and arrows over a handful of concrete types.
//!
//! The traits in this crate are implemented for marker tokens rather than for the types
//! themselves: `Either<L, PartiallyApplied>` is the [`Monad`] instance for `Either<L, _>`,
//! `Lazy<'a, PartiallyApplied>` the instance for deferred values, and
//! `Function<'a, PartiallyApplied, PartiallyApplied>` the [`Arrow`] instance for functions.
//!
//! ```rust
//! use basis::{Either, Monad, PartiallyApplied};
//!
//! type E = Either<&'static str, PartiallyApplied>;
//!
//! let all = E::sequence(vec![Either::Right(1), Either::Right(2), Either::Right(3)]);
//! assert_eq!(all, Either::Right(vec![1, 2, 3]));
//!
//! let first_failure = E::sequence(vec![Either::Right(1), Either::Left("err"), Either::Right(3)]);
//! assert_eq!(first_failure, Either::Left("err"));
//! ```
mod category;
mod either;
mod function;
mod functor;
mod lazy;
mod unique;

pub use category::{Arrow, ArrowApply, ArrowChoice, ArrowLoop, Category};
pub use either::{either, lefts, partition_eithers, rights, Either};
pub use function::Function;
pub use functor::{Applicative, Functor, Monad, PartiallyApplied, Pointed};
pub use lazy::{delay, force, Lazy, LazyError};
pub use unique::{Unique, UniqueSource};
