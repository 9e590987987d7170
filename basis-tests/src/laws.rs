pub mod either;
pub mod function;
pub mod lazy;
pub mod unique;

use proptest::prelude::*;

/// A small, printable `i32 -> i32` function, so failing law cases shrink to something readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Add(i32),
    Mul(i32),
    Xor(i32),
    Negate,
}

impl Step {
    pub fn apply(self, x: i32) -> i32 {
        match self {
            Step::Add(n) => x.wrapping_add(n),
            Step::Mul(n) => x.wrapping_mul(n),
            Step::Xor(n) => x ^ n,
            Step::Negate => x.wrapping_neg(),
        }
    }
}

pub fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        any::<i32>().prop_map(Step::Add),
        (-16..16i32).prop_map(Step::Mul),
        any::<i32>().prop_map(Step::Xor),
        Just(Step::Negate),
    ]
}

/// A [`Step`] that fails (with a `Left`) whenever its result exceeds `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guarded {
    pub step: Step,
    pub limit: i32,
}

impl Guarded {
    pub fn run(self, x: i32) -> basis::Either<String, i32> {
        let y = self.step.apply(x);
        if y > self.limit {
            basis::Either::Left(format!("{y} exceeds {}", self.limit))
        } else {
            basis::Either::Right(y)
        }
    }
}

pub fn arb_guarded() -> impl Strategy<Value = Guarded> {
    (arb_step(), any::<i32>()).prop_map(|(step, limit)| Guarded { step, limit })
}
