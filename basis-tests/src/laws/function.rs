use basis::Function;

#[cfg(test)]
use crate::laws::arb_step;
#[cfg(test)]
use basis::{Arrow, ArrowChoice, Category, Either, PartiallyApplied};
#[cfg(test)]
use proptest::prelude::*;

use crate::laws::Step;

/// Lift a [`Step`] into a [`Function`].
pub fn step_fn(step: Step) -> Function<'static, i32, i32> {
    Function::new(move |x| step.apply(x))
}

#[cfg(test)]
type F = Function<'static, PartiallyApplied, PartiallyApplied>;

#[cfg(test)]
proptest! {
    #[test]
    fn left_identity(f in arb_step(), x in any::<i32>()) {
        prop_assert_eq!(F::compose(F::identity(), step_fn(f)).apply(x), f.apply(x));
    }

    #[test]
    fn right_identity(f in arb_step(), x in any::<i32>()) {
        prop_assert_eq!(F::compose(step_fn(f), F::identity()).apply(x), f.apply(x));
    }

    #[test]
    fn composition_is_associative(
        f in arb_step(),
        g in arb_step(),
        h in arb_step(),
        x in any::<i32>(),
    ) {
        let grouped_right = F::compose(step_fn(h), F::compose(step_fn(g), step_fn(f)));
        let grouped_left = F::compose(F::compose(step_fn(h), step_fn(g)), step_fn(f));
        prop_assert_eq!(grouped_right.apply(x), grouped_left.apply(x));
        prop_assert_eq!(grouped_right.apply(x), h.apply(g.apply(f.apply(x))));
    }

    #[test]
    fn operators_agree_with_trait_methods(f in arb_step(), g in arb_step(), x in any::<i32>()) {
        let chained = F::then(step_fn(f), step_fn(g));
        prop_assert_eq!((step_fn(f) >> step_fn(g)).apply(x), chained.apply(x));
        prop_assert_eq!((step_fn(g) << step_fn(f)).apply(x), g.apply(f.apply(x)));
        prop_assert_eq!((step_fn(f) & step_fn(g)).apply(x), (f.apply(x), g.apply(x)));
        prop_assert_eq!((step_fn(f) * step_fn(g)).apply((x, x)), (f.apply(x), g.apply(x)));
    }

    #[test]
    fn arr_distributes_over_composition(f in arb_step(), g in arb_step(), x in any::<i32>()) {
        let lifted_once = F::arr(move |a: i32| g.apply(f.apply(a)));
        let lifted_twice =
            F::then(F::arr(move |a: i32| f.apply(a)), F::arr(move |a: i32| g.apply(a)));
        prop_assert_eq!(lifted_once.apply(x), lifted_twice.apply(x));
    }

    #[test]
    fn first_commutes_with_arr(f in arb_step(), x in any::<i32>(), kept in any::<u8>()) {
        let via_first = F::first::<i32, i32, u8>(F::arr(move |a: i32| f.apply(a)));
        let via_arr = F::arr(move |(a, d): (i32, u8)| (f.apply(a), d));
        prop_assert_eq!(via_first.apply((x, kept)), via_arr.apply((x, kept)));
    }

    #[test]
    fn fanin_after_sum_is_fanin_of_composites(
        f in arb_step(),
        g in arb_step(),
        h in arb_step(),
        input in prop_oneof![
            any::<i32>().prop_map(Either::Left),
            any::<i32>().prop_map(Either::Right),
        ],
    ) {
        let tagged_then_merged = F::sum(step_fn(f), step_fn(g)) >> (step_fn(h) | step_fn(h));
        let merged = (step_fn(f) >> step_fn(h)) | (step_fn(g) >> step_fn(h));
        prop_assert_eq!(tagged_then_merged.apply(input), merged.apply(input));
    }
}
