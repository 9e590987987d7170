use tracing::error;

use crate::functor::{Applicative, Functor, Monad, PartiallyApplied, Pointed};
use crate::lazy::{Knot, Lazy};

/// A value that is exactly one of `Left(L)` or `Right(R)`.
///
/// `Right` is the success channel: [`Pointed::pure`] builds a `Right`, and mapping, applying
/// and binding all act on the `Right` payload while forwarding a `Left` untouched. Once a
/// computation has produced a `Left`, every later step is skipped.
///
/// ```rust
/// # use basis::Either;
/// fn halve(n: i32) -> Either<String, i32> {
///     if n % 2 == 0 {
///         Either::Right(n / 2)
///     } else {
///         Either::Left(format!("{n} is odd"))
///     }
/// }
///
/// assert_eq!(Either::Right(12).and_then(halve).and_then(halve), Either::Right(3));
/// assert_eq!(
///     Either::Right(12).and_then(halve).and_then(halve).and_then(halve),
///     Either::Left("3 is odd".to_string()),
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Case analysis: exactly one of `on_left`, `on_right` runs.
    pub fn case_of<C>(self, on_left: impl FnOnce(L) -> C, on_right: impl FnOnce(R) -> C) -> C {
        match self {
            Either::Left(l) => on_left(l),
            Either::Right(r) => on_right(r),
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the `Right` payload; a `Left` passes through unchanged.
    pub fn map<B>(self, f: impl FnOnce(R) -> B) -> Either<L, B> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform the `Left` payload; a `Right` passes through unchanged.
    pub fn map_left<M>(self, f: impl FnOnce(L) -> M) -> Either<M, R> {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Continue with `f` on a `Right` payload; a `Left` short-circuits and `f` never runs.
    pub fn and_then<B>(self, f: impl FnOnce(R) -> Either<L, B>) -> Either<L, B> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Convert to a `Result`, turning a `Left` payload into an error with `to_error`
    pub fn map_left_into_result<E>(self, to_error: impl FnOnce(L) -> E) -> Result<R, E> {
        self.map_left(to_error).into_result()
    }

    /// The fixpoint of `f` in the `Right` channel.
    ///
    /// `f` receives a lazy handle to the `Right` payload it is about to produce, so the payload
    /// can refer to itself:
    ///
    /// ```rust
    /// # use basis::{Either, Function};
    /// let factorial = Either::<String, Function<u64, u64>>::mfix(|fact| {
    ///     Either::Right(Function::new(move |n: u64| {
    ///         if n == 0 { 1 } else { n * fact.force().apply(n - 1) }
    ///     }))
    /// });
    ///
    /// assert_eq!(factorial.right().map(|f| f.apply(5)), Some(120));
    /// ```
    ///
    /// # Panics
    ///
    /// If `f` yields a `Left`: a short-circuited computation has no fixpoint. Also if `f`
    /// forces the handle before returning, since the payload does not exist yet.
    ///
    /// # Leaks
    ///
    /// A payload that captures its own handle forms a reference cycle with it: the handle
    /// caches the payload once forced, and the payload keeps the handle. Each such call leaks
    /// the payload and its captures, forced or not.
    pub fn mfix<'a>(f: impl FnOnce(Lazy<'a, R>) -> Either<L, R>) -> Either<L, R>
    where
        R: Clone + 'a,
    {
        let knot = Knot::new();
        match f(knot.handle()) {
            Either::Right(r) => {
                knot.tie(Lazy::ready(r.clone()));
                Either::Right(r)
            }
            Either::Left(_) => {
                error!("mfix generator yielded a Left value");
                panic!("cannot take the fixpoint of a Left value")
            }
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

/// The universal eliminator for [`Either`], equivalent to [`Either::case_of`].
///
/// ```rust
/// # use basis::{either, Either};
/// let describe = |e: Either<&str, i32>| either(|s: &str| s.len() as i32, |n: i32| -n, e);
///
/// assert_eq!(describe(Either::Left("abc")), 3);
/// assert_eq!(describe(Either::Right(5)), -5);
/// ```
pub fn either<L, R, C>(
    on_left: impl FnOnce(L) -> C,
    on_right: impl FnOnce(R) -> C,
    value: Either<L, R>,
) -> C {
    value.case_of(on_left, on_right)
}

/// Every `Left` payload, in input order
pub fn lefts<L, R>(items: impl IntoIterator<Item = Either<L, R>>) -> Vec<L> {
    items.into_iter().filter_map(Either::left).collect()
}

/// Every `Right` payload, in input order
pub fn rights<L, R>(items: impl IntoIterator<Item = Either<L, R>>) -> Vec<R> {
    items.into_iter().filter_map(Either::right).collect()
}

/// `(lefts, rights)` in a single pass
pub fn partition_eithers<L, R>(items: impl IntoIterator<Item = Either<L, R>>) -> (Vec<L>, Vec<R>) {
    let mut ls = Vec::new();
    let mut rs = Vec::new();
    for item in items {
        match item {
            Either::Left(l) => ls.push(l),
            Either::Right(r) => rs.push(r),
        }
    }
    (ls, rs)
}

impl<'a, L: 'a> Functor<'a> for Either<L, PartiallyApplied> {
    type Frame<X: 'a> = Either<L, X>;

    #[inline(always)]
    fn fmap<A, B>(input: Either<L, A>, f: impl FnOnce(A) -> B + 'a) -> Either<L, B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        input.map(f)
    }
}

impl<'a, L: 'a> Pointed<'a> for Either<L, PartiallyApplied> {
    fn pure<A: 'a>(value: A) -> Either<L, A> {
        Either::Right(value)
    }
}

impl<'a, L: 'a> Applicative<'a> for Either<L, PartiallyApplied> {
    fn ap<A, B, F>(ff: Either<L, F>, fa: Either<L, A>) -> Either<L, B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
        F: FnOnce(A) -> B + Clone + 'a,
    {
        match ff {
            Either::Left(l) => Either::Left(l),
            Either::Right(f) => fa.map(f),
        }
    }
}

impl<'a, L: 'a> Monad<'a> for Either<L, PartiallyApplied> {
    #[inline(always)]
    fn bind<A, B>(ma: Either<L, A>, f: impl FnOnce(A) -> Either<L, B> + 'a) -> Either<L, B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        ma.and_then(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;

    type E = Either<&'static str, PartiallyApplied>;

    #[test]
    fn sequence_all_right() {
        let all = E::sequence(vec![Either::Right(1), Either::Right(2), Either::Right(3)]);
        assert_eq!(all, Either::Right(vec![1, 2, 3]));
    }

    #[test]
    fn sequence_surfaces_first_left() {
        let one_bad = E::sequence(vec![Either::Right(1), Either::Left("err"), Either::Right(3)]);
        assert_eq!(one_bad, Either::Left("err"));

        let two_bad = E::sequence(vec![
            Either::Left("first"),
            Either::Right(2),
            Either::Left("second"),
        ]);
        assert_eq!(two_bad, Either::Left("first"));
    }

    #[test]
    fn sequence_of_nothing_is_right() {
        let empty: Vec<Either<&str, i32>> = Vec::new();
        assert_eq!(E::sequence(empty), Either::Right(Vec::new()));
    }

    #[test]
    fn eliminator() {
        let len_or_negate =
            |e: Either<&str, i32>| either(|s: &str| s.len() as i32, |n: i32| -n, e);
        assert_eq!(len_or_negate(Either::Left("abc")), 3);
        assert_eq!(len_or_negate(Either::Right(5)), -5);
    }

    #[test]
    fn bind_short_circuits() {
        let mut called = false;
        let out = E::bind::<i32, i32>(Either::Left("stop"), |x| {
            called = true;
            Either::Right(x + 1)
        });
        assert_eq!(out, Either::Left("stop"));
        assert!(!called);
    }

    #[test]
    fn ap_prefers_the_function_side_left() {
        let ff: Either<&str, fn(i32) -> i32> = Either::Left("no function");
        let fa: Either<&str, i32> = Either::Left("no value");
        assert_eq!(E::ap(ff, fa), Either::Left("no function"));

        let ff: Either<&str, fn(i32) -> i32> = Either::Right(|x| x * 2);
        assert_eq!(E::ap(ff, Either::Left("no value")), Either::Left("no value"));
        assert_eq!(E::ap(ff, Either::Right(21)), Either::Right(42));
    }

    #[test]
    fn sequencing_operators() {
        assert_eq!(E::seq_right(Either::Right(1), Either::Right("b")), Either::Right("b"));
        assert_eq!(E::seq_left(Either::Right(1), Either::Right("b")), Either::Right(1));
        assert_eq!(
            E::seq_left(Either::Right(1), Either::<&str, i32>::Left("bad")),
            Either::Left("bad")
        );
        assert_eq!(
            E::then(Either::<&str, i32>::Left("bad"), Either::Right(2)),
            Either::Left("bad")
        );
        assert_eq!(E::replace(Either::Right(1), 'x'), Either::Right('x'));
    }

    #[test]
    fn lift_a3_combines_all_three() {
        let sum = E::lift_a3(
            |a: i32, b: i32, c: i32| a + b + c,
            Either::Right(1),
            Either::Right(2),
            Either::Right(3),
        );
        assert_eq!(sum, Either::Right(6));
    }

    #[test]
    fn map_m_and_kleisli() {
        let parse = |s: &'static str| -> Either<&'static str, i32> {
            s.parse::<i32>().map_err(|_| s).into()
        };
        assert_eq!(E::map_m(parse, ["1", "2"]), Either::Right(vec![1, 2]));
        assert_eq!(E::map_m(parse, ["1", "x", "y"]), Either::Left("x"));
        assert_eq!(E::for_m_unit(["1", "2"], parse), Either::Right(()));

        let non_negative = |n: i32| {
            if n >= 0 {
                Either::Right(n as u32)
            } else {
                Either::Left("negative")
            }
        };
        let parse_natural = E::kleisli(parse, non_negative);
        assert_eq!(parse_natural("7"), Either::Right(7u32));
        assert_eq!(parse_natural("-7"), Either::Left("negative"));
        assert_eq!(parse_natural("seven"), Either::Left("seven"));
    }

    #[test]
    fn join_flattens() {
        let nested: Either<&str, Either<&str, i32>> = Either::Right(Either::Right(3));
        assert_eq!(E::join(nested), Either::Right(3));
    }

    #[test]
    fn partition_preserves_order() {
        let items = vec![Either::Left('a'), Either::Right(1), Either::Left('b'), Either::Right(2)];
        assert_eq!(lefts(items.clone()), vec!['a', 'b']);
        assert_eq!(rights(items.clone()), vec![1, 2]);
        assert_eq!(partition_eithers(items), (vec!['a', 'b'], vec![1, 2]));
    }

    #[test]
    fn left_and_right_never_equal() {
        assert_ne!(Either::<i32, i32>::Left(1), Either::Right(1));
    }

    #[test]
    fn result_round_trip() {
        let e: Either<String, i32> = Ok(3).into();
        assert_eq!(e.clone().into_result(), Ok(3));
        assert_eq!(
            Either::<&str, i32>::Left("bad").map_left_into_result(|s| s.len()),
            Err(3)
        );
    }

    #[test]
    fn mfix_payload_keeps_its_captures_alive() {
        use std::rc::Rc;

        let marker = Rc::new(());
        let weak = Rc::downgrade(&marker);
        {
            let factorial = Either::<&str, Function<'static, u64, u64>>::mfix(|fact| {
                Either::Right(Function::new(move |n: u64| {
                    let _held = &marker;
                    if n == 0 {
                        1
                    } else {
                        n * fact.force().apply(n - 1)
                    }
                }))
            });
            assert_eq!(factorial.right().map(|f| f.apply(5)), Some(120));
        }
        assert!(weak.upgrade().is_some());
    }

    #[test]
    #[should_panic(expected = "fixpoint of a Left")]
    fn mfix_of_left_panics() {
        Either::<&str, i32>::mfix(|_| Either::Left("nope"));
    }
}
