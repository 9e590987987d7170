use std::fmt;
use std::ops::{Add, BitAnd, BitOr, Mul, Shl, Shr};
use std::rc::Rc;

use crate::category::{Arrow, ArrowApply, ArrowChoice, ArrowLoop, Category};
use crate::either::Either;
use crate::functor::PartiallyApplied;
use crate::lazy::{Knot, Lazy};

/// A transformation from `T` to `U`.
///
/// Cloning a `Function` shares the underlying closure; composing functions builds a new
/// `Function` and leaves its operands untouched. The usual arrow combinators are available as
/// operators:
///
/// | operator | arrow   | meaning                                   |
/// |----------|---------|-------------------------------------------|
/// | `f >> g` | `>>>`   | apply `f`, then `g`                       |
/// | `g << f` | `<<<`   | apply `f`, then `g`                       |
/// | `f * g`  | `***`   | `f` on the first of a pair, `g` on the second |
/// | `f & g`  | `&&&`   | feed one input to both                    |
/// | `f + g`  | `+++`   | `f` on `Left`, `g` on `Right`, keep the tag |
/// | `f \| g` | `\|\|\|` | `f` on `Left`, `g` on `Right`, drop the tag |
///
/// ```rust
/// # use basis::Function;
/// let inc = Function::new(|x: i32| x + 1);
/// let double = Function::new(|x: i32| x * 2);
///
/// assert_eq!((inc.clone() >> double.clone()).apply(3), 8);
/// assert_eq!((inc.clone() << double.clone()).apply(3), 7);
/// assert_eq!((inc & double).apply(4), (5, 8));
/// ```
pub struct Function<'a, T, U> {
    run: Rc<dyn Fn(T) -> U + 'a>,
}

/// the marker token that carries the category and arrow instances
type Fun<'a> = Function<'a, PartiallyApplied, PartiallyApplied>;

impl<'a, T, U> Function<'a, T, U> {
    pub fn new(f: impl Fn(T) -> U + 'a) -> Self {
        Function { run: Rc::new(f) }
    }

    pub fn apply(&self, x: T) -> U {
        (self.run)(x)
    }
}

impl<'a, T, U> Clone for Function<'a, T, U> {
    fn clone(&self) -> Self {
        Function {
            run: Rc::clone(&self.run),
        }
    }
}

impl<'a, T, U> fmt::Debug for Function<'a, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function<{}, {}>",
            std::any::type_name::<T>(),
            std::any::type_name::<U>()
        )
    }
}

impl<'a> Category<'a> for Function<'a, PartiallyApplied, PartiallyApplied> {
    type Morphism<A: 'a, B: 'a> = Function<'a, A, B>;

    fn identity<A: 'a>() -> Function<'a, A, A> {
        Function::new(|a| a)
    }

    fn compose<A: 'a, B: 'a, C: 'a>(
        g: Function<'a, B, C>,
        f: Function<'a, A, B>,
    ) -> Function<'a, A, C> {
        Function::new(move |a| g.apply(f.apply(a)))
    }
}

impl<'a> Arrow<'a> for Function<'a, PartiallyApplied, PartiallyApplied> {
    fn arr<A: 'a, B: 'a>(f: impl Fn(A) -> B + 'a) -> Function<'a, A, B> {
        Function::new(f)
    }

    fn split<A: 'a, B: 'a, C: 'a, D: 'a>(
        f: Function<'a, A, B>,
        g: Function<'a, C, D>,
    ) -> Function<'a, (A, C), (B, D)> {
        Function::new(move |(a, c): (A, C)| (f.apply(a), g.apply(c)))
    }
}

impl<'a> ArrowChoice<'a> for Function<'a, PartiallyApplied, PartiallyApplied> {
    fn fanin<A: 'a, B: 'a, C: 'a>(
        f: Function<'a, A, C>,
        g: Function<'a, B, C>,
    ) -> Function<'a, Either<A, B>, C> {
        Function::new(move |e: Either<A, B>| e.case_of(|a| f.apply(a), |b| g.apply(b)))
    }
}

impl<'a> ArrowApply<'a> for Function<'a, PartiallyApplied, PartiallyApplied> {
    fn app<A: 'a, B: 'a>() -> Function<'a, (Function<'a, A, B>, A), B> {
        Function::new(|(f, x): (Function<'a, A, B>, A)| f.apply(x))
    }
}

impl<'a> ArrowLoop<'a> for Function<'a, PartiallyApplied, PartiallyApplied> {
    fn feedback<B: 'a, C: 'a, D: Clone + 'a>(
        f: Function<'a, (B, Lazy<'a, D>), (C, Lazy<'a, D>)>,
    ) -> Function<'a, B, C> {
        Function::new(move |b| {
            let knot = Knot::new();
            let (c, fed_back) = f.apply((b, knot.handle()));
            knot.tie(fed_back);
            c
        })
    }
}

impl<'a, A: 'a, B: 'a, C: 'a> Shr<Function<'a, B, C>> for Function<'a, A, B> {
    type Output = Function<'a, A, C>;

    fn shr(self, g: Function<'a, B, C>) -> Function<'a, A, C> {
        Fun::then(self, g)
    }
}

impl<'a, A: 'a, B: 'a, C: 'a> Shl<Function<'a, A, B>> for Function<'a, B, C> {
    type Output = Function<'a, A, C>;

    fn shl(self, f: Function<'a, A, B>) -> Function<'a, A, C> {
        Fun::compose(self, f)
    }
}

impl<'a, A: 'a, B: 'a, C: 'a, D: 'a> Mul<Function<'a, C, D>> for Function<'a, A, B> {
    type Output = Function<'a, (A, C), (B, D)>;

    fn mul(self, g: Function<'a, C, D>) -> Function<'a, (A, C), (B, D)> {
        Fun::split(self, g)
    }
}

impl<'a, A: Clone + 'a, B: 'a, C: 'a> BitAnd<Function<'a, A, C>> for Function<'a, A, B> {
    type Output = Function<'a, A, (B, C)>;

    fn bitand(self, g: Function<'a, A, C>) -> Function<'a, A, (B, C)> {
        Fun::fanout(self, g)
    }
}

impl<'a, A: 'a, B: 'a, C: 'a, D: 'a> Add<Function<'a, C, D>> for Function<'a, A, B> {
    type Output = Function<'a, Either<A, C>, Either<B, D>>;

    fn add(self, g: Function<'a, C, D>) -> Function<'a, Either<A, C>, Either<B, D>> {
        Fun::sum(self, g)
    }
}

impl<'a, A: 'a, B: 'a, C: 'a> BitOr<Function<'a, B, C>> for Function<'a, A, C> {
    type Output = Function<'a, Either<A, B>, C>;

    fn bitor(self, g: Function<'a, B, C>) -> Function<'a, Either<A, B>, C> {
        Fun::fanin(self, g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Weak;

    #[test]
    fn identity_is_a_unit() {
        let f = Function::new(|x: i32| x * 3 - 1);
        let left = Fun::compose(Fun::identity(), f.clone());
        let right = Fun::compose(f.clone(), Fun::identity());
        for x in -5..5 {
            assert_eq!(left.apply(x), f.apply(x));
            assert_eq!(right.apply(x), f.apply(x));
        }
    }

    #[test]
    fn first_and_second_leave_the_other_half_alone() {
        let inc = Function::new(|x: i32| x + 1);
        assert_eq!(Fun::first(inc.clone()).apply((1, "kept")), (2, "kept"));
        assert_eq!(Fun::second(inc).apply(("kept", 1)), ("kept", 2));
    }

    #[test]
    fn choice_combinators() {
        let len = Function::new(|s: &str| s.len());
        let negate = Function::new(|n: i32| -n);

        let tagged = len.clone() + negate.clone();
        assert_eq!(tagged.apply(Either::Left("abc")), Either::Left(3));
        assert_eq!(tagged.apply(Either::Right(5)), Either::Right(-5));

        let to_i64 = Function::new(|n: usize| n as i64);
        let merged = (len.clone() >> to_i64) | Function::new(|n: i32| -(n as i64));
        assert_eq!(merged.apply(Either::Left("abcd")), 4);
        assert_eq!(merged.apply(Either::Right(2)), -2);

        let only_left = Fun::left::<&str, usize, i32>(len);
        assert_eq!(only_left.apply(Either::Right(9)), Either::Right(9));
        let only_right = Fun::right::<i32, i32, char>(negate);
        assert_eq!(only_right.apply(Either::Left('x')), Either::Left('x'));
        assert_eq!(only_right.apply(Either::Right(1)), Either::Right(-1));
    }

    #[test]
    fn app_applies_its_input() {
        let app = Fun::app::<i32, i32>();
        assert_eq!(app.apply((Function::new(|x| x * 10), 4)), 40);
    }

    #[test]
    fn feedback_passes_the_lazy_output_back_in() {
        // c depends on the fed-back d without forcing it during the call
        let f: Function<(i32, Lazy<i32>), (Lazy<i32>, Lazy<i32>)> =
            Function::new(|(b, d): (i32, Lazy<i32>)| {
                (d.map(move |x| x + b), Lazy::ready(b * 10))
            });
        let looped = Fun::feedback(f);
        assert_eq!(looped.apply(3).force(), 33);
        assert_eq!(looped.apply(4).force(), 44);
    }

    #[test]
    #[should_panic(expected = "before it was produced")]
    fn feedback_forcing_early_panics() {
        let f: Function<(i32, Lazy<i32>), (i32, Lazy<i32>)> =
            Function::new(|(b, d): (i32, Lazy<i32>)| (b + d.force(), d));
        Fun::feedback(f).apply(1);
    }

    #[test]
    #[should_panic(expected = "cyclic force")]
    fn feedback_without_production_panics() {
        let f: Function<(i32, Lazy<i32>), (Lazy<i32>, Lazy<i32>)> =
            Function::new(|(_, d): (i32, Lazy<i32>)| (d.clone(), d));
        Fun::feedback(f).apply(1).force();
    }

    #[test]
    fn feedback_releases_a_value_built_without_its_input() {
        type Marker = Rc<()>;
        let f: Function<((), Lazy<Marker>), (Lazy<Weak<()>>, Lazy<Marker>)> =
            Function::new(|((), d): ((), Lazy<Marker>)| {
                (d.map(|rc| Rc::downgrade(&rc)), Lazy::ready(Rc::new(())))
            });
        let weak = Fun::feedback(f).apply(()).force();
        assert!(weak.upgrade().is_none());
    }
}
