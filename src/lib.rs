//! A library for finding plans of transition systems with an incremental SAT solver.
//!
//! incplan reads a planning problem given as clause templates over a block of variables (an initial state, an invariant, a goal, and a transfer between consecutive states) and searches for a plan of increasing length, or makespan, by a sequence of calls to an incremental solver.
//! Clauses are only ever added to the solver, and clauses which should not hold in later calls are guarded by activation literals which are assumed for a single call.
//!
//! The timeline of a plan may be grown from the start only, or from both the start and the end, with the two ends stitched together by link clauses.
//!
//! # Orientation
//!
//! The library is designed around a [planner](crate::planner::Planner), built from a [problem](crate::problem::PlanningProblem), a [configuration](crate::config::Config), and a solver.
//!
//! - The [timeline] hands out time points, and says which time points are neighbours.
//! - The [mapping] translates a template literal at a time point to a solver literal.
//! - The [planner] emits clauses, makes solve rounds, and reads plans.
//! - Solvers are anything which implements [Ipasir](crate::ipasir::Ipasir), and the [ipasir] module contains an adapter to the [CaDiCaL](crate::ipasir::cadical) solver, a [scrambler](crate::ipasir::scrambler) for checking results do not depend on the names of variables or the order of clauses, and an [ICNF recorder](crate::ipasir::icnf).
//!
//! # Examples
//!
//! + Count with two bits, from `00` to `11`.
//!
//! ```rust
//! # use incplan::config::Config;
//! # use incplan::ipasir::cadical::CadicalSolver;
//! # use incplan::planner::{PlanOutcome, Planner};
//! # use incplan::problem::PlanningProblem;
//! let problem = PlanningProblem::read(
//!     "i cnf 2 2
//!      -1 0 -2 0
//!      u cnf 2 0
//!      g cnf 2 2
//!      1 0 2 0
//!      t cnf 4 6
//!      1 3 0 -1 -3 0
//!      -4 2 1 0 -4 -2 -1 0 4 -2 1 0 4 2 -1 0"
//!         .as_bytes(),
//! )
//! .unwrap();
//!
//! let mut planner = Planner::new(&problem, Config::default(), CadicalSolver::default()).unwrap();
//!
//! let PlanOutcome::Found(plan) = planner.solve().unwrap() else {
//!     panic!("no plan");
//! };
//!
//! assert_eq!(plan.makespan(), 3);
//! assert!(plan.is_valid_for(&problem));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with targets listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - A line for each solve can be found with `RUST_LOG=solve=info …`
//! - The clauses emitted at each time point can be found with `RUST_LOG=encoding=debug …`

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod config;
pub mod mapping;
pub mod planner;
pub mod problem;
pub mod timeline;
pub mod types;

pub mod generic;

pub mod misc;

pub mod ipasir;
