use std::cell::Cell;
use std::rc::Rc;

use basis::Lazy;

#[cfg(test)]
use crate::laws::arb_step;
#[cfg(test)]
use basis::{Applicative, Functor, Monad, PartiallyApplied, Pointed};
#[cfg(test)]
use proptest::prelude::*;

/// A suspended cell holding `value`, and a counter of how many times its thunk ran.
pub fn counted(value: i32) -> (Lazy<'static, i32>, Rc<Cell<usize>>) {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let cell = Lazy::delay(move || {
        counter.set(counter.get() + 1);
        value
    });
    (cell, runs)
}

#[cfg(test)]
type L = Lazy<'static, PartiallyApplied>;

#[cfg(test)]
proptest! {
    #[test]
    fn forcing_runs_the_thunk_once(
        value in any::<i32>(),
        handles in 1..8usize,
        forces in 1..4usize,
    ) {
        crate::init_tracing();
        let (cell, runs) = counted(value);
        let aliases: Vec<Lazy<i32>> = (0..handles).map(|_| cell.clone()).collect();
        prop_assert_eq!(runs.get(), 0);

        for _ in 0..forces {
            for alias in &aliases {
                prop_assert_eq!(alias.force(), value);
            }
        }
        prop_assert_eq!(cell.force(), value);
        prop_assert_eq!(runs.get(), 1);
    }

    #[test]
    fn functor_identity(value in any::<i32>()) {
        let (cell, runs) = counted(value);
        let mapped = L::fmap(cell, |a: i32| a);
        prop_assert_eq!(runs.get(), 0);
        prop_assert_eq!(mapped.force(), value);
    }

    #[test]
    fn functor_composition(value in any::<i32>(), f in arb_step(), g in arb_step()) {
        let (cell, runs) = counted(value);
        let fused = L::fmap(cell.clone(), move |a: i32| g.apply(f.apply(a)));
        let chained = L::fmap(L::fmap(cell, move |a: i32| f.apply(a)), move |a: i32| g.apply(a));
        prop_assert_eq!(fused.force(), chained.force());
        prop_assert_eq!(runs.get(), 1);
    }

    #[test]
    fn monad_left_identity(value in any::<i32>(), f in arb_step()) {
        let k = move |x: i32| L::fmap(L::pure(x), move |y: i32| f.apply(y));
        prop_assert_eq!(L::bind(L::pure(value), k).force(), k(value).force());
    }

    #[test]
    fn monad_right_identity(value in any::<i32>()) {
        let (cell, _) = counted(value);
        prop_assert_eq!(L::bind(cell, L::pure).force(), value);
    }

    #[test]
    fn monad_associativity(value in any::<i32>(), f in arb_step(), g in arb_step()) {
        let (cell, runs) = counted(value);
        let k = move |x: i32| L::pure(f.apply(x));
        let h = move |y: i32| L::pure(g.apply(y));

        let nested_left = L::bind(L::bind(cell.clone(), k), h);
        let nested_right = L::bind(cell, move |x: i32| L::bind(k(x), h));
        prop_assert_eq!(nested_left.force(), nested_right.force());
        prop_assert_eq!(nested_left.force(), g.apply(f.apply(value)));
        prop_assert_eq!(runs.get(), 1);
    }

    #[test]
    fn lift_a2_combines_suspended_cells(a in any::<i32>(), b in any::<i32>()) {
        let (left, left_runs) = counted(a);
        let (right, right_runs) = counted(b);
        let sum = L::lift_a2(|x: i32, y: i32| x.wrapping_add(y), left, right);
        prop_assert_eq!(sum.force(), a.wrapping_add(b));
        prop_assert_eq!(left_runs.get(), 1);
        prop_assert_eq!(right_runs.get(), 1);
    }

    #[test]
    fn sequence_keeps_list_order(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let cells = values.iter().map(|&v| counted(v).0);
        prop_assert_eq!(L::sequence(cells).force(), values);
    }
}
