//! Composable morphisms, and the arrow combinators layered on top of them.
//!
//! Like [`crate::Functor`], these traits are implemented for marker tokens, here with both
//! holes filled in: `Function<'a, PartiallyApplied, PartiallyApplied>`.
use crate::either::Either;
use crate::lazy::Lazy;

/// Morphisms from `A` to `B` that can be composed, with an identity morphism for every object.
///
/// # Laws
///
/// ```text
/// compose(identity(), f)            == f
/// compose(f, identity())            == f
/// compose(h, compose(g, f))         == compose(compose(h, g), f)
/// ```
///
/// Equality here is extensional: two morphisms are equal if they agree on every input.
pub trait Category<'a>: Sized + 'a {
    /// the morphism type, `A -> B`
    type Morphism<A: 'a, B: 'a>: 'a;

    fn identity<A: 'a>() -> Self::Morphism<A, A>;

    /// Right-to-left composition (`•`, `<<<`): apply `f`, then `g`
    fn compose<A: 'a, B: 'a, C: 'a>(
        g: Self::Morphism<B, C>,
        f: Self::Morphism<A, B>,
    ) -> Self::Morphism<A, C>;

    /// Left-to-right composition (`>>>`): apply `f`, then `g`
    fn then<A: 'a, B: 'a, C: 'a>(
        f: Self::Morphism<A, B>,
        g: Self::Morphism<B, C>,
    ) -> Self::Morphism<A, C> {
        Self::compose(g, f)
    }
}

/// A [`Category`] whose morphisms can be built from plain functions and wired up in parallel
/// over pairs.
///
/// ```rust
/// # use basis::{Arrow, Function, PartiallyApplied};
/// type F<'a> = Function<'a, PartiallyApplied, PartiallyApplied>;
///
/// let both = F::fanout(F::arr(|x: i32| x + 1), F::arr(|x: i32| x * 2));
/// assert_eq!(both.apply(4), (5, 8));
/// ```
pub trait Arrow<'a>: Category<'a> {
    /// Lift a plain function into a morphism
    fn arr<A: 'a, B: 'a>(f: impl Fn(A) -> B + 'a) -> Self::Morphism<A, B>;

    /// Run `f` on the first half of a pair and `g` on the second (`***`)
    fn split<A: 'a, B: 'a, C: 'a, D: 'a>(
        f: Self::Morphism<A, B>,
        g: Self::Morphism<C, D>,
    ) -> Self::Morphism<(A, C), (B, D)>;

    /// Run `f` on the first half of a pair, passing the second half through
    fn first<A: 'a, B: 'a, D: 'a>(f: Self::Morphism<A, B>) -> Self::Morphism<(A, D), (B, D)> {
        Self::split::<A, B, D, D>(f, Self::identity::<D>())
    }

    /// Run `f` on the second half of a pair, passing the first half through
    fn second<A: 'a, B: 'a, D: 'a>(f: Self::Morphism<A, B>) -> Self::Morphism<(D, A), (D, B)> {
        Self::split::<D, D, A, B>(Self::identity::<D>(), f)
    }

    /// Feed one input to both `f` and `g`, pairing their results (`&&&`)
    fn fanout<A: Clone + 'a, B: 'a, C: 'a>(
        f: Self::Morphism<A, B>,
        g: Self::Morphism<A, C>,
    ) -> Self::Morphism<A, (B, C)> {
        Self::then::<A, (A, A), (B, C)>(
            Self::arr(|a: A| (a.clone(), a)),
            Self::split::<A, B, A, C>(f, g),
        )
    }
}

/// An [`Arrow`] that can branch on an [`Either`] input.
pub trait ArrowChoice<'a>: Arrow<'a> {
    /// Eliminate an `Either`, sending `Left` payloads through `f` and `Right` payloads
    /// through `g` (`|||`)
    fn fanin<A: 'a, B: 'a, C: 'a>(
        f: Self::Morphism<A, C>,
        g: Self::Morphism<B, C>,
    ) -> Self::Morphism<Either<A, B>, C>;

    /// Run `f` on `Left` payloads and `g` on `Right` payloads, keeping the tag (`+++`)
    fn sum<A: 'a, B: 'a, C: 'a, D: 'a>(
        f: Self::Morphism<A, B>,
        g: Self::Morphism<C, D>,
    ) -> Self::Morphism<Either<A, C>, Either<B, D>> {
        Self::fanin::<A, C, Either<B, D>>(
            Self::then::<A, B, Either<B, D>>(f, Self::arr(Either::Left)),
            Self::then::<C, D, Either<B, D>>(g, Self::arr(Either::Right)),
        )
    }

    /// Run `f` on `Left` payloads, passing `Right` payloads through
    fn left<A: 'a, B: 'a, D: 'a>(
        f: Self::Morphism<A, B>,
    ) -> Self::Morphism<Either<A, D>, Either<B, D>> {
        Self::sum::<A, B, D, D>(f, Self::identity::<D>())
    }

    /// Run `f` on `Right` payloads, passing `Left` payloads through
    fn right<A: 'a, B: 'a, D: 'a>(
        f: Self::Morphism<A, B>,
    ) -> Self::Morphism<Either<D, A>, Either<D, B>> {
        Self::sum::<D, D, A, B>(Self::identity::<D>(), f)
    }
}

/// An [`Arrow`] that can apply a morphism it receives as input.
pub trait ArrowApply<'a>: Arrow<'a> {
    fn app<A: 'a, B: 'a>() -> Self::Morphism<(Self::Morphism<A, B>, A), B>;
}

/// An [`Arrow`] with a feedback channel.
///
/// `feedback(f)` turns `f: (B, D) -> (C, D)` into `B -> C` by feeding the `D` that `f`
/// produces back in as its own `D` input (Haskell's `loop`). Rust is strict, so the fed-back
/// value travels as a [`Lazy`] cell: `f` may pass it along, store it, or map over it, but must
/// not force it before returning. Forcing it early, or handing the input straight back as the
/// output and then forcing it, panics rather than diverging.
///
/// # Leaks
///
/// The fed-back cell and the value tied into it reference each other until the cell is
/// forced. A call whose fed-back `D` is built from its own `D` input (e.g. `d.map(..)`), or
/// whose input cell is never forced, leaks that cycle together with everything it captures.
pub trait ArrowLoop<'a>: Arrow<'a> {
    fn feedback<B: 'a, C: 'a, D: Clone + 'a>(
        f: Self::Morphism<(B, Lazy<'a, D>), (C, Lazy<'a, D>)>,
    ) -> Self::Morphism<B, C>;
}
