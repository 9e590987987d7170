//! A memoizing lazy cell: compute once, force many times.
//!
//! A [`Lazy`] is a shared handle to a single cell. Cloning the handle aliases the cell, so
//! every clone observes the same cached value once any of them has forced it.
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use thiserror::Error;
use tracing::{error, trace};

use crate::functor::{Applicative, Functor, Monad, PartiallyApplied, Pointed};

/// Ways in which forcing a [`Lazy`] can violate its contract.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LazyError {
    /// the cell was forced again from inside its own thunk
    #[error("lazy cell forced while it was already being evaluated (cyclic force)")]
    CyclicForce,
    /// the thunk panicked during an earlier force and was consumed
    #[error("lazy cell poisoned: its thunk panicked during an earlier force")]
    Poisoned,
    /// a fed-back value was forced before the computation producing it returned
    #[error("fed-back lazy value forced before it was produced")]
    Untied,
}

enum LazyState<'a, A> {
    Suspended(Box<dyn FnOnce() -> A + 'a>),
    Evaluating,
    Evaluated(A),
    Poisoned,
}

/// A deferred computation that runs at most once.
///
/// ```rust
/// # use basis::Lazy;
/// # use std::cell::Cell;
/// let runs = Cell::new(0);
/// let cell = Lazy::delay(|| {
///     runs.set(runs.get() + 1);
///     6 * 7
/// });
/// let alias = cell.clone();
///
/// assert_eq!(runs.get(), 0);
/// assert_eq!(cell.force(), 42);
/// assert_eq!(alias.force(), 42);
/// assert_eq!(runs.get(), 1);
/// ```
///
/// # Failure
///
/// A thunk that panics propagates the panic to whoever forced it, and the cell is left
/// poisoned: the thunk was consumed, so every later force reports [`LazyError::Poisoned`].
/// Forcing a cell from inside its own thunk reports [`LazyError::CyclicForce`] instead of
/// recursing forever.
pub struct Lazy<'a, A> {
    state: Rc<RefCell<LazyState<'a, A>>>,
}

impl<'a, A> Clone for Lazy<'a, A> {
    fn clone(&self) -> Self {
        Lazy {
            state: Rc::clone(&self.state),
        }
    }
}

impl<'a, A: 'a> Lazy<'a, A> {
    /// A suspended cell. `thunk` is not invoked until the cell is first forced.
    pub fn delay(thunk: impl FnOnce() -> A + 'a) -> Self {
        Self::from_state(LazyState::Suspended(Box::new(thunk)))
    }

    /// A cell that is already evaluated
    pub fn ready(value: A) -> Self {
        Self::from_state(LazyState::Evaluated(value))
    }

    fn from_state(state: LazyState<'a, A>) -> Self {
        Lazy {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Evaluated(_))
    }

    /// Whether both handles point at the same cell
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    /// Evaluate the cell if needed and return a copy of its value.
    ///
    /// The thunk runs on the first successful call only.
    pub fn try_force(&self) -> Result<A, LazyError>
    where
        A: Clone,
    {
        let thunk = {
            let mut state = self.state.borrow_mut();
            match mem::replace(&mut *state, LazyState::Evaluating) {
                LazyState::Suspended(thunk) => thunk,
                settled => {
                    *state = settled;
                    return match &*state {
                        LazyState::Evaluated(value) => Ok(value.clone()),
                        LazyState::Poisoned => Err(LazyError::Poisoned),
                        _ => Err(LazyError::CyclicForce),
                    };
                }
            }
        };

        trace!("evaluating suspended lazy cell");
        // the borrow is released while the thunk runs, so it may force other cells (or,
        // erroneously, this one)
        let guard = PoisonOnUnwind(&self.state);
        let value = thunk();
        let out = value.clone();
        *self.state.borrow_mut() = LazyState::Evaluated(value);
        drop(guard);
        Ok(out)
    }

    /// Evaluate the cell if needed and return a copy of its value.
    ///
    /// # Panics
    ///
    /// On any [`LazyError`]: these are contract violations, not recoverable conditions.
    pub fn force(&self) -> A
    where
        A: Clone,
    {
        match self.try_force() {
            Ok(value) => value,
            Err(err) => {
                error!(%err, "lazy cell contract violated");
                panic!("{err}")
            }
        }
    }

    /// A new cell holding `f` applied to this cell's value.
    ///
    /// If this cell has not been evaluated yet, nothing runs now: the new cell forces this
    /// one (sharing its cached value) when it is itself forced.
    ///
    /// Forcing recurses once per unevaluated link, so the stack depth needed to force a chain
    /// of deferred `map`s grows linearly with its length. Very long chains (on the order of a
    /// million links) overflow the stack; force intermediate cells to bound the depth.
    pub fn map<B: 'a>(self, f: impl FnOnce(A) -> B + 'a) -> Lazy<'a, B>
    where
        A: Clone,
    {
        let evaluated = match &*self.state.borrow() {
            LazyState::Evaluated(value) => Some(value.clone()),
            _ => None,
        };
        match evaluated {
            Some(value) => Lazy::ready(f(value)),
            None => Lazy::delay(move || f(self.force())),
        }
    }

    /// Force this cell and continue with `f`. Not lazy in the continuation.
    pub fn and_then<B: 'a>(self, f: impl FnOnce(A) -> Lazy<'a, B>) -> Lazy<'a, B>
    where
        A: Clone,
    {
        f(self.force())
    }
}

impl<'a, A: fmt::Debug> fmt::Debug for Lazy<'a, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_borrow() {
            Ok(state) => match &*state {
                LazyState::Evaluated(value) => f.debug_tuple("Lazy").field(value).finish(),
                LazyState::Suspended(_) => f.write_str("Lazy(<suspended>)"),
                LazyState::Evaluating => f.write_str("Lazy(<evaluating>)"),
                LazyState::Poisoned => f.write_str("Lazy(<poisoned>)"),
            },
            Err(_) => f.write_str("Lazy(<borrowed>)"),
        }
    }
}

// marks the cell poisoned if the thunk unwinds before the cell is settled
struct PoisonOnUnwind<'c, 'a, A>(&'c RefCell<LazyState<'a, A>>);

impl<'c, 'a, A> Drop for PoisonOnUnwind<'c, 'a, A> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut() {
            if matches!(&*state, LazyState::Evaluating) {
                *state = LazyState::Poisoned;
            }
        }
    }
}

/// Suspend `thunk` in a new cell
pub fn delay<'a, A: 'a>(thunk: impl FnOnce() -> A + 'a) -> Lazy<'a, A> {
    Lazy::delay(thunk)
}

/// Force `cell`, see [`Lazy::force`]
pub fn force<'a, A: Clone + 'a>(cell: &Lazy<'a, A>) -> A {
    cell.force()
}

/// A value that is consumed before it has been produced.
///
/// [`Knot::handle`] hands out a cell standing in for a value that will only exist once the
/// computation receiving the handle has returned; [`Knot::tie`] then supplies it. Forcing the
/// handle before the tie is a contract violation.
pub(crate) struct Knot<'a, A> {
    slot: Rc<RefCell<Option<Lazy<'a, A>>>>,
}

impl<'a, A: Clone + 'a> Knot<'a, A> {
    pub(crate) fn new() -> Self {
        Knot {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn handle(&self) -> Lazy<'a, A> {
        let slot = Rc::clone(&self.slot);
        Lazy::delay(move || {
            let tied = slot.borrow().clone();
            match tied {
                Some(value) => value.force(),
                None => {
                    error!("fed-back lazy value forced before it was produced");
                    panic!("{}", LazyError::Untied)
                }
            }
        })
    }

    pub(crate) fn tie(self, value: Lazy<'a, A>) {
        trace!("tying lazy knot");
        *self.slot.borrow_mut() = Some(value);
    }
}

impl<'a> Functor<'a> for Lazy<'a, PartiallyApplied> {
    type Frame<X: 'a> = Lazy<'a, X>;

    fn fmap<A, B>(input: Lazy<'a, A>, f: impl FnOnce(A) -> B + 'a) -> Lazy<'a, B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
    {
        input.map(f)
    }
}

impl<'a> Pointed<'a> for Lazy<'a, PartiallyApplied> {
    fn pure<A: 'a>(value: A) -> Lazy<'a, A> {
        Lazy::ready(value)
    }
}

impl<'a> Applicative<'a> for Lazy<'a, PartiallyApplied> {
    fn ap<A, B, F>(ff: Lazy<'a, F>, fa: Lazy<'a, A>) -> Lazy<'a, B>
    where
        A: Clone + 'a,
        B: Clone + 'a,
        F: FnOnce(A) -> B + Clone + 'a,
    {
        let evaluated = match &*ff.state.borrow() {
            LazyState::Evaluated(f) => Some(f.clone()),
            _ => None,
        };
        match evaluated {
            Some(f) => fa.map(f),
            None => Lazy::delay(move || (ff.force())(fa.force())),
        }
    }
}

impl<'a> Monad<'a> for Lazy<'a, PartiallyApplied> {
    fn bind<A, B>(ma: Lazy<'a, A>, f: impl FnOnce(A) -> Lazy<'a, B> + 'a) -> Lazy<'a, B>
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
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn forces_once() {
        let runs = Cell::new(0);
        let cell = delay(|| {
            runs.set(runs.get() + 1);
            "done".to_string()
        });

        assert!(!cell.is_evaluated());
        assert_eq!(force(&cell), "done");
        assert_eq!(force(&cell), "done");
        assert!(cell.is_evaluated());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn handles_share_the_cell() {
        let runs = Cell::new(0);
        let cell = Lazy::delay(|| {
            runs.set(runs.get() + 1);
            7
        });
        let alias = cell.clone();

        assert!(cell.ptr_eq(&alias));
        assert_eq!(alias.force(), 7);
        assert!(cell.is_evaluated());
        assert_eq!(cell.force(), 7);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn map_defers_until_forced() {
        let runs = Cell::new(0);
        let cell = Lazy::delay(|| {
            runs.set(runs.get() + 1);
            20
        });
        let mapped = cell.clone().map(|x| x + 1);

        assert_eq!(runs.get(), 0);
        assert_eq!(mapped.force(), 21);
        assert_eq!(runs.get(), 1);
        // the source cell was evaluated through the mapped one
        assert!(cell.is_evaluated());
        assert_eq!(cell.force(), 20);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn forcing_an_intermediate_link_bounds_the_chain() {
        let mut cell = Lazy::delay(|| 0u64);
        for i in 1..=2_000u64 {
            cell = cell.map(|x| x + 1);
            if i % 500 == 0 {
                assert_eq!(cell.force(), i);
            }
        }
        assert_eq!(cell.force(), 2_000);
    }

    #[test]
    fn map_over_evaluated_cell_is_immediate() {
        let mapped = Lazy::ready(2).map(|x| x * 10);
        assert!(mapped.is_evaluated());
        assert_eq!(mapped.force(), 20);
    }

    #[test]
    fn cyclic_force_is_detected() {
        let slot: Rc<RefCell<Option<Lazy<'static, i32>>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let cell = Lazy::delay(move || {
            let me = inner.borrow().clone().expect("slot filled before forcing");
            match me.try_force() {
                Err(LazyError::CyclicForce) => -1,
                _ => 0,
            }
        });
        *slot.borrow_mut() = Some(cell.clone());

        assert_eq!(cell.force(), -1);
        assert!(cell.is_evaluated());
    }

    #[test]
    fn panicking_thunk_poisons_the_cell() {
        let cell: Lazy<'static, i32> = Lazy::delay(|| panic!("boom"));
        let first = catch_unwind(AssertUnwindSafe(|| cell.force()));

        assert!(first.is_err());
        assert_eq!(cell.try_force(), Err(LazyError::Poisoned));
    }

    #[test]
    fn knot_resolves_after_tie() {
        let knot = Knot::new();
        let handle = knot.handle();
        knot.tie(Lazy::ready(5));
        assert_eq!(handle.force(), 5);
    }

    #[test]
    #[should_panic(expected = "before it was produced")]
    fn knot_forced_early_panics() {
        let knot: Knot<'static, i32> = Knot::new();
        knot.handle().force();
    }

    #[test]
    fn applicative_over_suspended_function() {
        let f = Lazy::delay(|| |x: i32| x * 3);
        let x = Lazy::delay(|| 4);
        let applied = Lazy::<PartiallyApplied>::ap(f, x.clone());

        assert!(!x.is_evaluated());
        assert_eq!(applied.force(), 12);
        assert!(x.is_evaluated());
    }

    #[test]
    fn sequence_forces_in_order() {
        let order = RefCell::new(Vec::new());
        let cells: Vec<_> = (0..3)
            .map(|i| {
                let order = &order;
                Lazy::delay(move || {
                    order.borrow_mut().push(i);
                    i * 2
                })
            })
            .collect();

        let all = Lazy::<PartiallyApplied>::sequence(cells);
        assert_eq!(all.force(), vec![0, 2, 4]);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }
}
