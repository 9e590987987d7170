/// "An uninhabited type used to define instances for partially-applied types."
///
/// For example: the [`Functor`] instance for `Either<L, R>` cannot be written over the
/// partially-applied type `Either<L>`, so instead we write it over `Either<L, PartiallyApplied>`
#[derive(Clone, Copy, Debug)]
pub enum PartiallyApplied {}

/// A type constructor `Frame<_>` whose contents can be mapped over via `fmap`.
///
/// # Implementing this trait
///
/// Rust does not allow for implementing a trait for a partially applied type. That is,
/// we can implement a trait for `Option<usize>` but we can't implement a trait for just
/// `Option`. For this reason, every instance in this crate is implemented for a marker
/// token built with the uninhabited [`PartiallyApplied`] enum, eg
///
/// ```rust
/// # use basis::{Functor, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl<'a> Functor<'a> for MyOption<PartiallyApplied> {
///     type Frame<X: 'a> = MyOption<X>;
///
///     fn fmap<A, B>(input: Self::Frame<A>, f: impl FnOnce(A) -> B + 'a) -> Self::Frame<B>
///     where
///         A: Clone + 'a,
///         B: Clone + 'a,
///     {
///         match input {
///             MyOption::Some(x) => MyOption::Some(f(x)),
///             MyOption::None => MyOption::None,
///         }
///     }
/// }
///
/// let mapped = MyOption::<PartiallyApplied>::fmap(MyOption::Some(1), |n| n + 10);
/// assert_eq!(mapped, MyOption::Some(11));
/// ```
///
/// # Laws
///
/// ```text
/// fmap(x, |a| a)            == x
/// fmap(x, |a| g(f(a)))      == fmap(fmap(x, f), g)
/// ```
///
/// The lifetime `'a` bounds every payload and every function handed to the instance, which
/// lets deferred instances such as [`crate::Lazy`] hold on to them.
pub trait Functor<'a>: Sized + 'a {
    /// the type constructor mapped over by `fmap`
    type Frame<X: 'a>: 'a;

    /// Apply some function `f` to the contents of a frame
    fn fmap<A, B>(input: Self::Frame<A>, f: impl FnOnce(A) -> B + 'a) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a;

    /// Replace the contents of a frame with `value`, keeping its structure (`<%`)
    fn replace<A, B>(input: Self::Frame<A>, value: B) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        Self::fmap::<A, B>(input, move |_| value)
    }
}

/// A [`Functor`] with a canonical way to lift a plain value into a frame.
pub trait Pointed<'a>: Functor<'a> {
    fn pure<A: 'a>(value: A) -> Self::Frame<A>;
}

/// A [`Pointed`] functor that can apply a function held in one frame to a value held in
/// another, combining the two frames' effects.
///
/// ```rust
/// # use basis::{Applicative, Either, PartiallyApplied};
/// type E = Either<&'static str, PartiallyApplied>;
///
/// let sum = E::lift_a2(|a: i32, b: i32| a + b, Either::Right(2), Either::Right(3));
/// assert_eq!(sum, Either::Right(5));
///
/// let failed = E::lift_a2(|a: i32, b: i32| a + b, Either::Right(2), Either::Left("nope"));
/// assert_eq!(failed, Either::Left("nope"));
/// ```
pub trait Applicative<'a>: Pointed<'a> {
    /// Sequential application (`<*>`)
    fn ap<A, B, F>(ff: Self::Frame<F>, fa: Self::Frame<A>) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
        F: FnOnce(A) -> B + Clone + 'a;

    /// Sequence both frames, keeping the contents of the second (`*>`)
    fn seq_right<A, B>(fa: Self::Frame<A>, fb: Self::Frame<B>) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        Self::ap::<B, B, _>(Self::fmap::<A, _>(fa, |_| |b: B| b), fb)
    }

    /// Sequence both frames, keeping the contents of the first (`<*`)
    fn seq_left<A, B>(fa: Self::Frame<A>, fb: Self::Frame<B>) -> Self::Frame<A>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        Self::ap::<B, A, _>(Self::fmap::<A, _>(fa, |a: A| move |_: B| a), fb)
    }

    fn lift_a<A, B>(f: impl FnOnce(A) -> B + Clone + 'a, fa: Self::Frame<A>) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        Self::ap::<A, B, _>(Self::pure(f), fa)
    }

    fn lift_a2<A, B, C>(
        f: impl FnOnce(A, B) -> C + Clone + 'a,
        fa: Self::Frame<A>,
        fb: Self::Frame<B>,
    ) -> Self::Frame<C>
    where
        A: Clone + 'a,
        B: Clone + 'a,
        C: Clone + 'a,
    {
        Self::ap::<B, C, _>(Self::fmap::<A, _>(fa, move |a: A| move |b: B| f(a, b)), fb)
    }

    fn lift_a3<A, B, C, D>(
        f: impl FnOnce(A, B, C) -> D + Clone + 'a,
        fa: Self::Frame<A>,
        fb: Self::Frame<B>,
        fc: Self::Frame<C>,
    ) -> Self::Frame<D>
    where
        A: Clone + 'a,
        B: Clone + 'a,
        C: Clone + 'a,
        D: Clone + 'a,
    {
        let partial = Self::fmap::<A, _>(fa, move |a: A| move |b: B| move |c: C| f(a, b, c));
        Self::ap::<C, D, _>(Self::ap::<B, _, _>(partial, fb), fc)
    }
}

/// An [`Applicative`] supporting dependent sequencing: the result of one step picks the
/// next computation.
///
/// # Laws
///
/// ```text
/// bind(pure(a), f)                  == f(a)
/// bind(m, pure)                     == m
/// bind(bind(m, f), g)               == bind(m, |x| bind(f(x), g))
/// ```
pub trait Monad<'a>: Applicative<'a> {
    /// Dependent sequencing (`>>-`)
    fn bind<A, B>(ma: Self::Frame<A>, f: impl FnOnce(A) -> Self::Frame<B> + 'a) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a;

    /// Sequence two computations, discarding the first result (`>>`)
    fn then<A, B>(ma: Self::Frame<A>, mb: Self::Frame<B>) -> Self::Frame<B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        Self::bind::<A, B>(ma, move |_| mb)
    }

    fn join<A>(mma: Self::Frame<Self::Frame<A>>) -> Self::Frame<A>
    where
        A: Clone + 'a,
        Self::Frame<A>: Clone,
    {
        Self::bind::<Self::Frame<A>, A>(mma, |ma| ma)
    }

    /// Run every computation in list order, collecting their results.
    ///
    /// Computations are combined left to right, so for short-circuiting instances the
    /// first failure in list order is the one that surfaces.
    fn sequence<A>(items: impl IntoIterator<Item = Self::Frame<A>>) -> Self::Frame<Vec<A>>
    where
        A: Clone + 'a,
    {
        items
            .into_iter()
            .fold(Self::pure(Vec::new()), |acc, item| {
                Self::bind::<Vec<A>, Vec<A>>(acc, move |mut collected| {
                    Self::fmap::<A, Vec<A>>(item, move |x| {
                        collected.push(x);
                        collected
                    })
                })
            })
    }

    /// `sequence`, discarding the results
    fn sequence_unit<A>(items: impl IntoIterator<Item = Self::Frame<A>>) -> Self::Frame<()>
    where
        A: Clone + 'a,
    {
        items.into_iter().fold(Self::pure(()), |acc, item| {
            Self::bind::<(), ()>(acc, move |()| Self::fmap::<A, ()>(item, |_| ()))
        })
    }

    fn map_m<A, B>(
        f: impl FnMut(A) -> Self::Frame<B>,
        items: impl IntoIterator<Item = A>,
    ) -> Self::Frame<Vec<B>>
    where
        B: Clone + 'a,
    {
        Self::sequence(items.into_iter().map(f))
    }

    fn map_m_unit<A, B>(
        f: impl FnMut(A) -> Self::Frame<B>,
        items: impl IntoIterator<Item = A>,
    ) -> Self::Frame<()>
    where
        B: Clone + 'a,
    {
        Self::sequence_unit(items.into_iter().map(f))
    }

    /// `map_m` with its arguments flipped
    fn for_m<A, B>(
        items: impl IntoIterator<Item = A>,
        f: impl FnMut(A) -> Self::Frame<B>,
    ) -> Self::Frame<Vec<B>>
    where
        B: Clone + 'a,
    {
        Self::map_m(f, items)
    }

    fn for_m_unit<A, B>(
        items: impl IntoIterator<Item = A>,
        f: impl FnMut(A) -> Self::Frame<B>,
    ) -> Self::Frame<()>
    where
        B: Clone + 'a,
    {
        Self::map_m_unit(f, items)
    }

    /// Left-to-right Kleisli composition (`>->`): run `f`, then feed its result to `g`
    fn kleisli<A, B, C>(
        f: impl Fn(A) -> Self::Frame<B> + 'a,
        g: impl Fn(B) -> Self::Frame<C> + Clone + 'a,
    ) -> impl Fn(A) -> Self::Frame<C> + 'a
    where
        A: Clone + 'a,
        B: Clone + 'a,
        C: Clone + 'a,
    {
        move |a| Self::bind::<B, C>(f(a), g.clone())
    }

    /// Right-to-left Kleisli composition (`<-<`)
    fn kleisli_rev<A, B, C>(
        g: impl Fn(B) -> Self::Frame<C> + Clone + 'a,
        f: impl Fn(A) -> Self::Frame<B> + 'a,
    ) -> impl Fn(A) -> Self::Frame<C> + 'a
    where
        A: Clone + 'a,
        B: Clone + 'a,
        C: Clone + 'a,
    {
        Self::kleisli(f, g)
    }
}
