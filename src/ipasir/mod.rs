//! The interface to an incremental SAT solver, following the IPASIR API.
//!
//! Information about the API may be found at <https://github.com/biotomas/ipasir>.
//!
//! A [planner](crate::planner::Planner) talks to a solver only through the [Ipasir] trait, and the trait mirrors the API closely:
//! - Clauses are added literal by literal with [add](Ipasir::add), where 0 terminates a clause.
//! - Assumptions hold for the next call to [solve](Ipasir::solve) only.
//! - After a satisfiable solve the value of a literal is given by [val](Ipasir::val), and after an unsatisfiable solve [failed](Ipasir::failed) says whether an assumption took part in the refutation.
//! - [reset](Ipasir::reset) returns a solver to its initial state, forgetting clauses, assumptions *and* callbacks.
//!
//! Literals are (non-zero) `i32`s, with negation as arithmetic negation, as in DIMACS.
//!
//! # Implementations
//!
//! - [CadicalSolver](cadical::CadicalSolver), the CaDiCaL solver.
//! - [ScrambledSolver](scrambler::ScrambledSolver), which wraps some solver and permutes variables, clauses, literals, and assumptions before passing them on.
//! - [IcnfRecorder](icnf::IcnfRecorder), which wraps some solver and writes each call in the incremental CNF format.
//!
//! Anything else speaking the API, e.g. bindings to an external solver, may be used by implementing the trait.

use std::rc::Rc;

pub mod cadical;
pub mod icnf;
pub mod scrambler;

/// The response of a solver to a call to [solve](Ipasir::solve).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveResponse {
    /// The clauses and assumptions are satisfiable.
    Sat,

    /// The clauses and assumptions are unsatisfiable.
    Unsat,

    /// The solve was stopped by the terminate callback.
    Interrupted,
}

impl SolveResponse {
    /// The IPASIR code of the response.
    pub fn code(&self) -> i32 {
        match self {
            Self::Sat => 10,
            Self::Unsat => 20,
            Self::Interrupted => 0,
        }
    }
}

impl std::fmt::Display for SolveResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "SAT"),
            Self::Unsat => write!(f, "UNSAT"),
            Self::Interrupted => write!(f, "INTERRUPTED"),
        }
    }
}

/// The value of a literal in the model of a satisfiable solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LitValue {
    True,
    False,

    /// Either value extends the model.
    DontCare,
}

impl LitValue {
    /// The IPASIR style value of `literal`, i.e. `literal`, `-literal`, or 0.
    pub fn as_literal(&self, literal: i32) -> i32 {
        match self {
            Self::True => literal,
            Self::False => -literal,
            Self::DontCare => 0,
        }
    }
}

/// Called during a solve, which stops the solve when `true` is returned.
///
/// Reference counted, so a caller may keep a handle to (re)install the callback after a [reset](Ipasir::reset).
pub type TerminateCallback = Rc<dyn Fn() -> bool>;

/// Called with each learnt clause which fits some length bound.
pub type LearnCallback = Box<dyn FnMut(&[i32])>;

/// An incremental SAT solver.
pub trait Ipasir {
    /// The name and version of the solver.
    fn signature(&self) -> String;

    /// Adds `lit_or_zero` to the clause being built, or finishes the clause if `lit_or_zero` is 0.
    fn add(&mut self, lit_or_zero: i32);

    /// Adds each literal of `clause`, followed by 0.
    fn add_clause(&mut self, clause: &[i32]) {
        for literal in clause {
            self.add(*literal);
        }
        self.add(0);
    }

    /// Assumes `literal` for the next solve.
    fn assume(&mut self, literal: i32);

    /// Solves under the clauses added so far and the current assumptions, which are then cleared.
    fn solve(&mut self) -> SolveResponse;

    /// The value of `literal` after a satisfiable solve.
    fn val(&mut self, literal: i32) -> LitValue;

    /// Whether the assumption `literal` was used to refute the formula, after an unsatisfiable solve.
    fn failed(&mut self, literal: i32) -> bool;

    /// Installs, or with `None` removes, the terminate callback.
    fn set_terminate(&mut self, callback: Option<TerminateCallback>);

    /// Installs, or with `None` removes, the learn callback for clauses of at most `max_length` literals.
    fn set_learn(&mut self, max_length: usize, callback: Option<LearnCallback>);

    /// Returns the solver to its initial state, forgetting clauses, assumptions, and callbacks.
    fn reset(&mut self);
}

impl<S: Ipasir + ?Sized> Ipasir for Box<S> {
    fn signature(&self) -> String {
        (**self).signature()
    }

    fn add(&mut self, lit_or_zero: i32) {
        (**self).add(lit_or_zero)
    }

    fn add_clause(&mut self, clause: &[i32]) {
        (**self).add_clause(clause)
    }

    fn assume(&mut self, literal: i32) {
        (**self).assume(literal)
    }

    fn solve(&mut self) -> SolveResponse {
        (**self).solve()
    }

    fn val(&mut self, literal: i32) -> LitValue {
        (**self).val(literal)
    }

    fn failed(&mut self, literal: i32) -> bool {
        (**self).failed(literal)
    }

    fn set_terminate(&mut self, callback: Option<TerminateCallback>) {
        (**self).set_terminate(callback)
    }

    fn set_learn(&mut self, max_length: usize, callback: Option<LearnCallback>) {
        (**self).set_learn(max_length, callback)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
