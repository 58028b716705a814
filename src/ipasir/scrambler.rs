//! A wrapper which scrambles everything passed to a solver.
//!
//! Solvers are sensitive to the names of variables and to the order of clauses, literals, and assumptions.
//! So, to separate the effect of an encoding from the effect of some lucky order, a [ScrambledSolver] buffers clauses and assumptions and, on each solve:
//! - Gives each variable not seen before a fresh name, with the fresh names handed out in a random order.
//! - Shuffles the buffered clauses, the literals of each clause, and the assumptions.
//!
//! Names, once given, are kept until a [reset](Ipasir::reset), and so clauses added over many solves stay consistent.
//!
//! All randomness is drawn from a [MinimalPCG32] seeded at construction, and so a scrambled run is reproduced by reusing the seed.
//!
//! ```rust
//! # use incplan::ipasir::{Ipasir, LitValue, SolveResponse};
//! # use incplan::ipasir::cadical::CadicalSolver;
//! # use incplan::ipasir::scrambler::ScrambledSolver;
//! let mut solver = ScrambledSolver::new(CadicalSolver::default(), 73);
//! solver.add_clause(&[-1, 2]);
//! solver.assume(1);
//!
//! assert_eq!(solver.solve(), SolveResponse::Sat);
//! assert_eq!(solver.val(2), LitValue::True);
//! ```

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use rand::{seq::SliceRandom, SeedableRng};

use crate::{
    generic::minimal_pcg::MinimalPCG32,
    ipasir::{Ipasir, LearnCallback, LitValue, SolveResponse, TerminateCallback},
    misc::log::targets,
};

/// A bijection between the variables of a caller and the variables of the wrapped solver.
#[derive(Debug)]
struct Renaming {
    /// Indexed by caller variable, with 0 for a variable without a name.
    to_inner: Vec<u32>,

    /// Indexed by inner variable, with 0 mapped to 0.
    from_inner: Vec<u32>,
}

impl Default for Renaming {
    fn default() -> Self {
        Renaming {
            to_inner: vec![0],
            from_inner: vec![0],
        }
    }
}

impl Renaming {
    fn is_named(&self, variable: u32) -> bool {
        self.to_inner.get(variable as usize).is_some_and(|inner| *inner != 0)
    }

    /// Names each variable of `fresh`, in order.
    fn extend(&mut self, fresh: &[u32]) {
        for variable in fresh {
            let inner = self.from_inner.len() as u32;
            self.from_inner.push(*variable);

            let index = *variable as usize;
            if self.to_inner.len() <= index {
                self.to_inner.resize(index + 1, 0);
            }
            self.to_inner[index] = inner;
        }
    }

    fn rename(table: &[u32], literal: i32) -> Option<i32> {
        match table.get(literal.unsigned_abs() as usize) {
            Some(0) | None => None,
            Some(variable) => {
                let variable = *variable as i32;
                match literal.is_positive() {
                    true => Some(variable),
                    false => Some(-variable),
                }
            }
        }
    }

    fn map(&self, literal: i32) -> Option<i32> {
        Self::rename(&self.to_inner, literal)
    }

    fn unmap(&self, literal: i32) -> Option<i32> {
        Self::rename(&self.from_inner, literal)
    }
}

/// A solver whose input is scrambled before being passed on to `S`.
pub struct ScrambledSolver<S: Ipasir> {
    solver: S,
    seed: u64,
    rng: MinimalPCG32,

    clauses: Vec<Vec<i32>>,
    clause_buffer: Vec<i32>,
    assumptions: Vec<i32>,

    /// Shared with the learn callback installed on the inner solver.
    renaming: Rc<RefCell<Renaming>>,
}

impl<S: Ipasir> ScrambledSolver<S> {
    pub fn new(solver: S, seed: u64) -> Self {
        log::info!(target: targets::SCRAMBLE, "Scrambling with seed {seed}");
        ScrambledSolver {
            solver,
            seed,
            rng: MinimalPCG32::from_seed(seed.to_le_bytes()),
            clauses: Vec::default(),
            clause_buffer: Vec::default(),
            assumptions: Vec::default(),
            renaming: Rc::default(),
        }
    }

    /// The seed the scrambler was built with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The literal passed to the wrapped solver in place of `literal`, if `literal` has been named.
    pub fn inner_literal(&self, literal: i32) -> Option<i32> {
        self.renaming.borrow().map(literal)
    }

    /// The wrapped solver.
    pub fn into_inner(self) -> S {
        self.solver
    }

    /// Names the variables of the buffer not seen before, in a random order.
    fn name_fresh_variables(&mut self) {
        let mut renaming = self.renaming.borrow_mut();

        let mut batch = HashSet::new();
        let mut fresh = Vec::default();
        for literal in self.clauses.iter().flatten().chain(self.assumptions.iter()) {
            let variable = literal.unsigned_abs();
            if !renaming.is_named(variable) && batch.insert(variable) {
                fresh.push(variable);
            }
        }

        fresh.shuffle(&mut self.rng);
        renaming.extend(&fresh);
        log::debug!(target: targets::SCRAMBLE, "Named {} fresh variables", fresh.len());
    }
}

impl<S: Ipasir> Ipasir for ScrambledSolver<S> {
    fn signature(&self) -> String {
        self.solver.signature()
    }

    fn add(&mut self, lit_or_zero: i32) {
        match lit_or_zero {
            0 => self.clauses.push(std::mem::take(&mut self.clause_buffer)),
            literal => self.clause_buffer.push(literal),
        }
    }

    fn assume(&mut self, literal: i32) {
        self.assumptions.push(literal);
    }

    fn solve(&mut self) -> SolveResponse {
        self.name_fresh_variables();

        self.clauses.shuffle(&mut self.rng);
        for clause in self.clauses.iter_mut() {
            clause.shuffle(&mut self.rng);
        }
        self.assumptions.shuffle(&mut self.rng);

        {
            let renaming = self.renaming.borrow();
            for clause in self.clauses.drain(..) {
                for literal in clause {
                    if let Some(inner) = renaming.map(literal) {
                        self.solver.add(inner);
                    }
                }
                self.solver.add(0);
            }
            for literal in self.assumptions.drain(..) {
                if let Some(inner) = renaming.map(literal) {
                    self.solver.assume(inner);
                }
            }
        }

        self.solver.solve()
    }

    fn val(&mut self, literal: i32) -> LitValue {
        let inner = self.renaming.borrow().map(literal);
        match inner {
            Some(inner) => self.solver.val(inner),
            None => LitValue::DontCare,
        }
    }

    fn failed(&mut self, literal: i32) -> bool {
        let inner = self.renaming.borrow().map(literal);
        match inner {
            Some(inner) => self.solver.failed(inner),
            None => false,
        }
    }

    fn set_terminate(&mut self, callback: Option<TerminateCallback>) {
        self.solver.set_terminate(callback);
    }

    fn set_learn(&mut self, max_length: usize, callback: Option<LearnCallback>) {
        let wrapped = callback.map(|mut callback| {
            let renaming = self.renaming.clone();
            Box::new(move |clause: &[i32]| {
                let unmapped: Vec<i32> = {
                    let renaming = renaming.borrow();
                    clause.iter().filter_map(|literal| renaming.unmap(*literal)).collect()
                };
                callback(&unmapped);
            }) as LearnCallback
        });
        self.solver.set_learn(max_length, wrapped);
    }

    fn reset(&mut self) {
        self.solver.reset();
        self.clauses.clear();
        self.clause_buffer.clear();
        self.assumptions.clear();
        *self.renaming.borrow_mut() = Renaming::default();
    }
}
