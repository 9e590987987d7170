use basis::Either;
use proptest::prelude::*;

#[cfg(test)]
use crate::laws::{arb_guarded, arb_step};
#[cfg(test)]
use basis::{lefts, partition_eithers, rights, Functor, Monad, PartiallyApplied, Pointed};

pub fn arb_either() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(Either::Left),
        any::<i32>().prop_map(Either::Right),
    ]
}

#[cfg(test)]
type E = Either<String, PartiallyApplied>;

#[cfg(test)]
proptest! {
    #[test]
    fn functor_identity(x in arb_either()) {
        prop_assert_eq!(E::fmap(x.clone(), |a: i32| a), x);
    }

    #[test]
    fn functor_composition(x in arb_either(), f in arb_step(), g in arb_step()) {
        let fused = E::fmap(x.clone(), move |a: i32| g.apply(f.apply(a)));
        let chained = E::fmap(E::fmap(x, move |a: i32| f.apply(a)), move |a: i32| g.apply(a));
        prop_assert_eq!(fused, chained);
    }

    #[test]
    fn monad_left_identity(a in any::<i32>(), k in arb_guarded()) {
        prop_assert_eq!(E::bind(E::pure(a), move |x: i32| k.run(x)), k.run(a));
    }

    #[test]
    fn monad_right_identity(m in arb_either()) {
        prop_assert_eq!(E::bind(m.clone(), E::pure), m);
    }

    #[test]
    fn monad_associativity(m in arb_either(), f in arb_guarded(), g in arb_guarded()) {
        let nested_left =
            E::bind(E::bind(m.clone(), move |x: i32| f.run(x)), move |y: i32| g.run(y));
        let nested_right = E::bind(m, move |x: i32| E::bind(f.run(x), move |y: i32| g.run(y)));
        prop_assert_eq!(nested_left, nested_right);
    }

    #[test]
    fn kleisli_rev_runs_its_right_operand_first(
        x in any::<i32>(),
        f in arb_guarded(),
        g in arb_guarded(),
    ) {
        let composed = E::kleisli_rev(move |y: i32| g.run(y), move |a: i32| f.run(a));
        prop_assert_eq!(composed(x), E::bind(f.run(x), move |y: i32| g.run(y)));

        let forward = E::kleisli(move |a: i32| f.run(a), move |y: i32| g.run(y));
        prop_assert_eq!(composed(x), forward(x));
    }

    #[test]
    fn bind_short_circuits_on_left(err in "[a-z]{1,8}") {
        let called = std::cell::Cell::new(false);
        let out = E::bind(Either::<String, i32>::Left(err.clone()), |x: i32| {
            called.set(true);
            Either::Right(x)
        });
        prop_assert_eq!(out, Either::Left(err));
        prop_assert!(!called.get());
    }

    #[test]
    fn sequence_surfaces_the_first_left(items in prop::collection::vec(arb_either(), 0..16)) {
        let expected = match items.iter().find_map(|e| e.clone().left()) {
            Some(first) => Either::Left(first),
            None => Either::Right(rights(items.clone())),
        };
        prop_assert_eq!(E::sequence(items), expected);
    }

    #[test]
    fn lefts_and_rights_partition_the_input(items in prop::collection::vec(arb_either(), 0..32)) {
        let ls = lefts(items.clone());
        let rs = rights(items.clone());
        prop_assert_eq!(ls.len() + rs.len(), items.len());

        let in_order: Vec<i32> =
            items.iter().filter_map(|e| e.as_ref().right().copied()).collect();
        prop_assert_eq!(&rs, &in_order);

        prop_assert_eq!(partition_eithers(items), (ls, rs));
    }

    #[test]
    fn result_conversion_preserves_the_branch(x in arb_either()) {
        prop_assert_eq!(Either::from(x.clone().into_result()), x);
    }

    #[test]
    fn json_round_trip(x in arb_either()) {
        let encoded = serde_json::to_string(&x).unwrap();
        let decoded: Either<String, i32> = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, x);
    }
}

#[test]
fn json_shape_is_externally_tagged() {
    let left: Either<String, i32> = Either::Left("boom".to_string());
    let right: Either<String, i32> = Either::Right(7);
    assert_eq!(serde_json::to_string(&left).unwrap(), r#"{"Left":"boom"}"#);
    assert_eq!(serde_json::to_string(&right).unwrap(), r#"{"Right":7}"#);
}
