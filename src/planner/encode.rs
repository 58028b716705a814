//! Emission of clauses to the solver.
//!
//! Templates are emitted clause by clause, with each clause translated in full by the mapper before any literal is passed to the solver.
//! So, a failed translation leaves no partial clause with the solver.

use crate::{
    config::Encoding,
    ipasir::Ipasir,
    misc::log::targets,
    problem::Section,
    timeline::TimePoint,
    types::err,
};

use super::{Planner, ACTIVATION_LITERAL};

impl<S: Ipasir> Planner<'_, S> {
    /// Emits the template of `section` at `time_point`.
    pub(super) fn emit_section(&mut self, section: Section, time_point: TimePoint) -> Result<(), err::ErrorKind> {
        let problem = self.problem;
        log::debug!(target: targets::ENCODING, "{section:?} at {time_point}");

        for clause in problem.clauses(section) {
            let mapped = clause
                .iter()
                .map(|literal| self.mapper.problem_literal(*literal, time_point))
                .collect::<Result<Vec<_>, _>>()?;
            self.solver.add_clause(&mapped);
        }
        Ok(())
    }

    /// Emits the transfer template from `from` to `to`.
    ///
    /// Literals in `[1, L]` are placed at `from`, and literals in `(L, 2L]` are shifted down by `L` and placed at `to`.
    pub(super) fn emit_transfer(&mut self, from: TimePoint, to: TimePoint) -> Result<(), err::ErrorKind> {
        let problem = self.problem;
        let width = problem.literals_per_step() as i32;
        log::debug!(target: targets::ENCODING, "Transfer from {from} to {to}");

        for clause in problem.clauses(Section::Transfer) {
            let mapped = clause
                .iter()
                .map(|literal| match literal.abs() <= width {
                    true => self.mapper.problem_literal(*literal, from),
                    false => {
                        let shifted = literal - literal.signum() * width;
                        self.mapper.problem_literal(shifted, to)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.solver.add_clause(&mapped);
        }
        Ok(())
    }

    /// The activation literal of `time_point`.
    pub(super) fn activation_literal(&mut self, time_point: TimePoint) -> Result<i32, err::ErrorKind> {
        Ok(self.mapper.helper_literal(ACTIVATION_LITERAL, time_point)?)
    }

    /// Emits the goal at the most recent time point, with each clause guarded by `activation`.
    ///
    /// With unit goal assumption, unit goal clauses are assumed rather than added.
    fn emit_guarded_goal(&mut self, activation: i32) -> Result<(), err::ErrorKind> {
        let problem = self.problem;
        let at = self.last;
        log::debug!(target: targets::ENCODING, "Goal at {at}, guarded by {activation}");

        for clause in problem.clauses(Section::Goal) {
            if self.config.unit_goal_assumption && clause.len() == 1 {
                let unit = self.mapper.problem_literal(clause[0], at)?;
                self.solver.assume(unit);
                continue;
            }

            let mut guarded = Vec::with_capacity(clause.len() + 1);
            guarded.push(-activation);
            for literal in clause {
                guarded.push(self.mapper.problem_literal(*literal, at)?);
            }
            self.solver.add_clause(&guarded);
        }
        Ok(())
    }

    /// The pair of time points to be linked, in the order they appear in the plan.
    ///
    /// The most recent time point is linked to its neighbour on the other branch, or if nothing has been grown the two seeds are linked.
    pub(super) fn link_pair(&self) -> Result<(TimePoint, TimePoint), err::ErrorKind> {
        let last = self.last;

        let pair = if last == self.timeline.last() {
            (self.timeline.first(), last)
        } else if self.timeline.is_on_forward_branch(last) {
            let predecessor = self.timeline.predecessor(last)?;
            (last, self.timeline.successor(predecessor)?)
        } else {
            let successor = self.timeline.successor(last)?;
            (self.timeline.predecessor(successor)?, last)
        };
        Ok(pair)
    }

    /// Emits clauses which, when `activation` holds, make the states of the link pair identical.
    fn emit_link(&mut self, activation: i32) -> Result<(), err::ErrorKind> {
        let (a, b) = self.link_pair()?;
        log::debug!(target: targets::ENCODING, "Link {a} and {b}, guarded by {activation}");

        for literal in 1..=self.problem.literals_per_step() as i32 {
            let at_a = self.mapper.problem_literal(literal, a)?;
            let at_b = self.mapper.problem_literal(literal, b)?;

            self.solver.add_clause(&[-activation, -at_a, at_b]);
            self.solver.add_clause(&[-activation, at_a, -at_b]);
        }
        Ok(())
    }

    /// Emits the goal or the link, and assumes the activation literal of the most recent time point for the next solve.
    pub(super) fn emit_final(&mut self) -> Result<i32, err::ErrorKind> {
        let activation = self.activation_literal(self.last)?;

        match self.config.encoding {
            Encoding::SingleEnded => self.emit_guarded_goal(activation)?,
            Encoding::DoubleEnded => self.emit_link(activation)?,
        }

        self.solver.assume(activation);
        Ok(activation)
    }
}
