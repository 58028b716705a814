//! The [Ipasir] API over [CaDiCaL](https://github.com/arminbiere/cadical), through the [cadical] crate.
//!
//! The crate takes whole clauses and a list of assumptions with each solve, so literals and assumptions are buffered until a clause is finished or a solve is made.
//!
//! Callbacks are held by the solver as a single [Callbacks] object, which is rebuilt whenever either callback changes.
//!
//! ```rust
//! # use incplan::ipasir::{Ipasir, LitValue, SolveResponse};
//! # use incplan::ipasir::cadical::CadicalSolver;
//! let mut solver = CadicalSolver::default();
//! solver.add_clause(&[-1, 2]);
//! solver.assume(1);
//! assert_eq!(solver.solve(), SolveResponse::Sat);
//! assert_eq!(solver.val(2), LitValue::True);
//!
//! solver.assume(-2);
//! assert_eq!(solver.solve(), SolveResponse::Unsat);
//! assert!(solver.failed(-2));
//! ```

use cadical::{Callbacks, Solver};

use crate::{
    ipasir::{Ipasir, LearnCallback, LitValue, SolveResponse, TerminateCallback},
    misc::log::targets,
};

/// The callbacks installed in a CaDiCaL instance.
#[derive(Default)]
struct Hooks {
    terminate: Option<TerminateCallback>,
    max_length: i32,
    learn: Option<LearnCallback>,
}

impl Callbacks for Hooks {
    fn terminate(&mut self) -> bool {
        match &self.terminate {
            Some(terminate) => terminate(),
            None => false,
        }
    }

    fn max_length(&self) -> i32 {
        self.max_length
    }

    fn learn(&mut self, clause: &[i32]) {
        if let Some(learn) = &mut self.learn {
            learn(clause)
        }
    }
}

/// A CaDiCaL instance.
pub struct CadicalSolver {
    solver: Solver<Hooks>,
    clause_buffer: Vec<i32>,
    assumptions: Vec<i32>,

    /// The response of the most recent solve, if no clause or assumption has been given since.
    last_response: Option<SolveResponse>,
}

impl Default for CadicalSolver {
    fn default() -> Self {
        CadicalSolver {
            solver: Solver::new(),
            clause_buffer: Vec::default(),
            assumptions: Vec::default(),
            last_response: None,
        }
    }
}

impl CadicalSolver {
    /// Takes the installed hooks, for the caller to amend and reinstall.
    fn take_hooks(&mut self) -> Hooks {
        match self.solver.get_callbacks() {
            Some(hooks) => std::mem::take(hooks),
            None => Hooks::default(),
        }
    }

    fn install_hooks(&mut self, hooks: Hooks) {
        match hooks.terminate.is_none() && hooks.learn.is_none() {
            true => self.solver.set_callbacks(None),
            false => self.solver.set_callbacks(Some(hooks)),
        }
    }
}

impl Ipasir for CadicalSolver {
    fn signature(&self) -> String {
        self.solver.signature().to_string()
    }

    fn add(&mut self, lit_or_zero: i32) {
        self.last_response = None;
        match lit_or_zero {
            0 => {
                let clause = std::mem::take(&mut self.clause_buffer);
                self.solver.add_clause(clause);
            }
            literal => self.clause_buffer.push(literal),
        }
    }

    fn add_clause(&mut self, clause: &[i32]) {
        self.last_response = None;
        match self.clause_buffer.is_empty() {
            true => self.solver.add_clause(clause.iter().copied()),
            false => {
                self.clause_buffer.extend_from_slice(clause);
                self.add(0);
            }
        }
    }

    fn assume(&mut self, literal: i32) {
        self.last_response = None;
        self.assumptions.push(literal);
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = std::mem::take(&mut self.assumptions);
        let assumption_count = assumptions.len();
        let response = match self.solver.solve_with(assumptions) {
            Some(true) => SolveResponse::Sat,
            Some(false) => SolveResponse::Unsat,
            None => SolveResponse::Interrupted,
        };
        log::trace!(target: targets::SOLVE, "CaDiCaL under {assumption_count} assumptions: {response}");
        self.last_response = Some(response);
        response
    }

    fn val(&mut self, literal: i32) -> LitValue {
        if self.last_response != Some(SolveResponse::Sat) {
            return LitValue::DontCare;
        }
        match self.solver.value(literal) {
            Some(true) => LitValue::True,
            Some(false) => LitValue::False,
            None => LitValue::DontCare,
        }
    }

    fn failed(&mut self, literal: i32) -> bool {
        self.last_response == Some(SolveResponse::Unsat) && self.solver.failed(literal)
    }

    fn set_terminate(&mut self, callback: Option<TerminateCallback>) {
        let mut hooks = self.take_hooks();
        hooks.terminate = callback;
        self.install_hooks(hooks);
    }

    fn set_learn(&mut self, max_length: usize, callback: Option<LearnCallback>) {
        let mut hooks = self.take_hooks();
        hooks.max_length = i32::try_from(max_length).unwrap_or(i32::MAX);
        hooks.learn = callback;
        self.install_hooks(hooks);
    }

    fn reset(&mut self) {
        *self = CadicalSolver::default();
    }
}

#[cfg(test)]
mod cadical_tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn clauses_built_literal_by_literal() {
        let mut solver = CadicalSolver::default();
        for literal in [1, 2, 0, -1, 0] {
            solver.add(literal);
        }
        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.val(1), LitValue::False);
        assert_eq!(solver.val(2), LitValue::True);
        assert_eq!(solver.val(-2), LitValue::False);
    }

    #[test]
    fn assumptions_last_one_solve() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(&[-1, 2]);
        solver.add_clause(&[-2, 3]);

        solver.assume(1);
        solver.assume(-3);
        assert_eq!(solver.solve(), SolveResponse::Unsat);
        assert!(solver.failed(1));
        assert!(solver.failed(-3));

        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert!(!solver.failed(1));
    }

    #[test]
    fn values_need_a_satisfiable_solve() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(&[1]);
        assert_eq!(solver.val(1), LitValue::DontCare);

        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.val(1), LitValue::True);

        solver.add_clause(&[-1]);
        assert_eq!(solver.val(1), LitValue::DontCare);
        assert_eq!(solver.solve(), SolveResponse::Unsat);
        assert_eq!(solver.val(1), LitValue::DontCare);
    }

    #[test]
    fn terminate_interrupts() {
        let mut solver = CadicalSolver::default();
        let p = |pigeon: i32, hole: i32| 8 * pigeon + hole + 1;
        for pigeon in 0..9 {
            solver.add_clause(&(0..8).map(|hole| p(pigeon, hole)).collect::<Vec<_>>());
        }
        for hole in 0..8 {
            for a in 0..9 {
                for b in (a + 1)..9 {
                    solver.add_clause(&[-p(a, hole), -p(b, hole)]);
                }
            }
        }

        let polls = Rc::new(Cell::new(0));
        let count = polls.clone();
        solver.set_terminate(Some(Rc::new(move || {
            count.set(count.get() + 1);
            true
        })));

        assert_eq!(solver.solve(), SolveResponse::Interrupted);
        assert!(polls.get() > 0);

        solver.set_terminate(None);
        solver.reset();
        solver.add_clause(&[1]);
        assert_eq!(solver.solve(), SolveResponse::Sat);
    }

    #[test]
    fn reset_forgets_clauses() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);
        assert_eq!(solver.solve(), SolveResponse::Unsat);

        solver.reset();
        solver.add_clause(&[-1]);
        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.val(1), LitValue::False);
    }
}
