/*!
The incremental planner.

A [Planner] owns a solver, and searches for a plan by a sequence of rounds.
Each round grows the timeline to the makespan given by the [schedule](crate::config::MakespanSchedule) for the round, closes the timeline, and makes one call to solve (or two, with an intermediate solve).

# Rounds

- Initializing: the timeline is seeded.
  The initial and invariant templates are emitted at the first time point and, for a double ended encoding, the goal and invariant templates are emitted at the last time point.
- Growing: a fresh time point is acquired for each step of makespan, with the invariant emitted at the time point and the transfer emitted between the time point and its neighbour on the side it was grown from.
  So, transfer is always emitted forwards in time, whichever end grew.
- Finalizing: for a single ended encoding the goal is emitted at the most recent time point, and for a double ended encoding the most recent time point is linked to its neighbour on the other branch.
  Either way, the clauses are guarded by the activation literal of the most recent time point, which is assumed for the next solve only.
- Solved, if the solve was satisfiable, and otherwise Extending, with the next round growing the timeline further.

Clauses are never removed from the solver.
Instead, the goal or link clauses of a failed round are disabled as their activation literal is no longer assumed.
With [clean_literal](crate::config::Config::clean_literal) the negation of the activation literal is also asserted.

With [non_incremental](crate::config::Config::non_incremental) each round starts from a reset solver and a fresh timeline.

# Example

```rust
# use incplan::config::{Config, Encoding};
# use incplan::ipasir::cadical::CadicalSolver;
# use incplan::planner::{PlanOutcome, Planner};
# use incplan::problem::PlanningProblem;
// A bit, initially false, which should be true.
let problem = PlanningProblem::from_templates(1, vec![-1, 0], vec![], vec![1, 0], vec![-1, 2, 0]).unwrap();

let config = Config::with_encoding(Encoding::SingleEnded);
let mut planner = Planner::new(&problem, config, CadicalSolver::default()).unwrap();

match planner.solve().unwrap() {
    PlanOutcome::Found(plan) => {
        assert_eq!(plan.makespan(), 1);
        assert_eq!(plan.steps(), &[vec![-1], vec![1]]);
    }
    _ => panic!("no plan"),
}
```
*/

mod encode;
mod plan;
mod records;

pub use plan::{Plan, PlanFormat};
pub use records::{Report, SolveRecord};

use std::time::Instant;

use crate::{
    config::{Config, Encoding},
    ipasir::{Ipasir, LitValue, SolveResponse, TerminateCallback},
    mapping::VariableAddressMapper,
    misc::log::targets,
    problem::{PlanningProblem, Section},
    timeline::{TimePoint, TimePointManager, TopElementMode},
    types::err::{self},
};

/// The width of the helper block of each time point.
const HELPERS_PER_STEP: u32 = 1;

/// The helper literal used to activate the goal or link clauses of a time point.
const ACTIVATION_LITERAL: i32 = 1;

/// The state of a planner, in terms of the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerState {
    Initializing,
    Growing,
    Finalizing,
    Solved,
    Extending,
}

/// The outcome of a search for a plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    Found(Plan),

    /// No plan was found before some limit, with `makespan` the greatest makespan solved for.
    NoPlan { makespan: u32 },

    /// The terminator asked for the search to stop.
    Interrupted,
}

/// An incremental planner for `problem`, over solver `S`.
pub struct Planner<'p, S: Ipasir> {
    problem: &'p PlanningProblem,
    config: Config,
    solver: S,

    timeline: TimePointManager,
    mapper: VariableAddressMapper,

    /// The count of time points grown beyond the seeds.
    makespan: u32,

    /// The most recently acquired time point.
    last: TimePoint,

    state: PlannerState,

    /// A count of completed rounds, which is also the schedule step of the next round.
    rounds: u32,

    /// The makespan of the most recent round, if any.
    attempted: Option<u32>,

    /// Whether clauses have been given to the solver, and so a fresh start requires a reset.
    solver_used: bool,

    records: Vec<SolveRecord>,

    terminator: Option<TerminateCallback>,
}

fn fresh_timeline(config: &Config) -> TimePointManager {
    match config.encoding {
        Encoding::SingleEnded => TimePointManager::single_ended(),
        Encoding::DoubleEnded => {
            TimePointManager::double_ended(config.ratio.value, TopElementMode::Duplicated)
        }
    }
}

fn fresh_mapper(problem: &PlanningProblem, config: &Config) -> VariableAddressMapper {
    VariableAddressMapper::new(
        problem.literals_per_step(),
        HELPERS_PER_STEP,
        config.helper_placement,
        config.reserved_slots(),
    )
}

impl<'p, S: Ipasir> Planner<'p, S> {
    /// A planner for `problem`, after checking `config` is valid.
    pub fn new(problem: &'p PlanningProblem, config: Config, solver: S) -> Result<Self, err::ErrorKind> {
        config.validate()?;
        log::debug!(target: targets::SOLVE, "Planning with {} encoding, over {}", config.encoding, solver.signature());

        let timeline = fresh_timeline(&config);
        let mapper = fresh_mapper(problem, &config);
        let last = timeline.first();

        Ok(Planner {
            problem,
            config,
            solver,
            timeline,
            mapper,
            makespan: 0,
            last,
            state: PlannerState::Initializing,
            rounds: 0,
            attempted: None,
            solver_used: false,
            records: Vec::default(),
            terminator: None,
        })
    }

    /// Installs `terminator` as the terminate callback of the solver, and checks it between rounds.
    pub fn set_terminator(&mut self, terminator: TerminateCallback) {
        self.solver.set_terminate(Some(terminator.clone()));
        self.terminator = Some(terminator);
    }

    fn should_terminate(&self) -> bool {
        match &self.terminator {
            Some(terminator) => terminator(),
            None => false,
        }
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    /// The count of time points grown beyond the seeds.
    pub fn makespan(&self) -> u32 {
        self.makespan
    }

    /// A count of completed rounds.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Records of each solve made, in order.
    pub fn records(&self) -> &[SolveRecord] {
        &self.records
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timeline(&self) -> &TimePointManager {
        &self.timeline
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn into_solver(self) -> S {
        self.solver
    }

    /// Seeds a fresh timeline, resetting the solver if it was used.
    fn initialize(&mut self) -> Result<(), err::ErrorKind> {
        self.state = PlannerState::Initializing;

        if self.solver_used {
            self.solver.reset();
            self.solver.set_terminate(self.terminator.clone());
        }
        self.solver_used = true;

        self.timeline = fresh_timeline(&self.config);
        self.mapper = fresh_mapper(self.problem, &self.config);
        self.makespan = 0;

        let first = self.timeline.acquire_next();
        self.emit_section(Section::Initial, first)?;
        self.emit_section(Section::Invariant, first)?;
        self.last = first;

        if self.config.encoding == Encoding::DoubleEnded {
            let last = self.timeline.acquire_next();
            self.emit_section(Section::Goal, last)?;
            self.emit_section(Section::Invariant, last)?;
            self.last = last;
        }

        Ok(())
    }

    /// Grows the timeline until the makespan is `target`.
    fn grow_to(&mut self, target: u32) -> Result<(), err::ErrorKind> {
        self.state = PlannerState::Growing;

        while self.makespan < target {
            let fresh = self.timeline.acquire_next();
            self.emit_section(Section::Invariant, fresh)?;

            match self.timeline.is_on_forward_branch(fresh) {
                true => {
                    let predecessor = self.timeline.predecessor(fresh)?;
                    self.emit_transfer(predecessor, fresh)?;
                }
                false => {
                    let successor = self.timeline.successor(fresh)?;
                    self.emit_transfer(fresh, successor)?;
                }
            }

            self.last = fresh;
            self.makespan += 1;
        }

        Ok(())
    }

    fn timed_solve(&mut self, intermediate: bool) -> SolveResponse {
        let start = Instant::now();
        let response = self.solver.solve();
        let duration = start.elapsed();

        log::info!(target: targets::SOLVE, "Round {} makespan {}: {response} in {:.3}s{}",
            self.rounds,
            self.makespan,
            duration.as_secs_f64(),
            if intermediate { " (intermediate)" } else { "" });

        self.records.push(SolveRecord {
            round: self.rounds,
            makespan: self.makespan,
            response,
            duration,
            intermediate,
        });
        response
    }

    /// The makespan targeted in round `step`, capped by the makespan limit.
    fn target_makespan(&self, step: u32) -> u32 {
        let scheduled = self.config.schedule.makespan(step);
        match self.config.max_makespan {
            Some(limit) => scheduled.min(limit),
            None => scheduled,
        }
    }

    /// Makes a single round, for the makespan scheduled at `step`.
    pub fn solve_round(&mut self, step: u32) -> Result<SolveResponse, err::ErrorKind> {
        if self.config.non_incremental || !self.solver_used {
            self.initialize()?;
        }

        let target = self.target_makespan(step);
        self.grow_to(target)?;

        if self.config.intermediate_solve {
            self.timed_solve(true);
        }

        self.state = PlannerState::Finalizing;
        let activation = self.emit_final()?;

        let response = self.timed_solve(false);
        self.attempted = Some(self.makespan);
        self.rounds += 1;

        // The activation literal is reused if the next round targets the same makespan.
        let reused = self.target_makespan(step.saturating_add(1)) <= self.makespan;
        if self.config.clean_literal && response != SolveResponse::Sat && !reused {
            log::debug!(target: targets::ENCODING, "Cleaning activation literal {activation}");
            self.solver.add_clause(&[-activation]);
        }

        self.state = match response {
            SolveResponse::Sat => PlannerState::Solved,
            SolveResponse::Unsat | SolveResponse::Interrupted => PlannerState::Extending,
        };

        Ok(response)
    }

    /// Whether a limit on rounds or on makespan has been reached.
    fn limit_reached(&self) -> bool {
        if let Some(limit) = self.config.max_rounds {
            if self.rounds >= limit {
                return true;
            }
        }

        match (self.config.max_makespan, self.attempted) {
            (Some(limit), Some(attempted)) => attempted >= limit,
            _ => false,
        }
    }

    /// Makes rounds until a plan is found, a limit is reached, or the terminator asks to stop.
    pub fn solve(&mut self) -> Result<PlanOutcome, err::ErrorKind> {
        loop {
            if self.should_terminate() {
                log::info!(target: targets::SOLVE, "Interrupted after {} rounds", self.rounds);
                return Ok(PlanOutcome::Interrupted);
            }

            if self.limit_reached() {
                let makespan = self.attempted.unwrap_or_default();
                log::info!(target: targets::SOLVE, "No plan up to makespan {makespan}");
                return Ok(PlanOutcome::NoPlan { makespan });
            }

            if self.solve_round(self.rounds)? == SolveResponse::Sat {
                log::info!(target: targets::SOLVE, "Final makespan: {}", self.makespan);
                return Ok(PlanOutcome::Found(self.plan()?));
            }
        }
    }

    /// The plan given by the most recent solve, which must have been satisfiable.
    ///
    /// Variables the solver does not care about are read as false.
    pub fn plan(&mut self) -> Result<Plan, err::ErrorKind> {
        if self.state != PlannerState::Solved {
            return Err(err::PlannerError::NotSolved.into());
        }

        let width = self.problem.literals_per_step() as i32;
        let mut steps = Vec::default();

        for time_point in self.timeline.timeline()? {
            let mut step = Vec::with_capacity(width as usize);
            for literal in 1..=width {
                let variable = self.mapper.problem_literal(literal, time_point)?;
                let value = match self.solver.val(variable) {
                    LitValue::True => literal,
                    LitValue::False | LitValue::DontCare => -literal,
                };
                step.push(value);
            }
            steps.push(step);
        }

        Ok(Plan::new(self.problem.literals_per_step(), steps))
    }
}
