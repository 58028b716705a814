/*!
Planning problems.

A planning problem is a transition system given by four templates of clauses over a block of `L` literals:
- `initial`, which holds of the first state.
- `invariant`, which holds of every state.
- `goal`, which holds of the last state.
- `transfer`, which holds of every pair of consecutive states.
  Literals in `[1, L]` refer to the earlier state, and literals in `(L, 2L]` refer to the later state.

Each template is a flat sequence of literals, where 0 terminates a clause.

Problems are typically [read](PlanningProblem::read) from text, though may be built [directly](PlanningProblem::from_templates).
*/

mod parse;

use crate::types::err::{self};

/// A section of a planning problem, identified by its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Initial,
    Invariant,
    Goal,
    Transfer,
}

impl Section {
    /// The sections, in the order they are read.
    pub const ORDER: [Section; 4] = [
        Section::Initial,
        Section::Invariant,
        Section::Goal,
        Section::Transfer,
    ];

    /// The one letter tag of the section.
    pub fn tag(&self) -> char {
        match self {
            Self::Initial => 'i',
            Self::Invariant => 'u',
            Self::Goal => 'g',
            Self::Transfer => 't',
        }
    }
}

/// A planning problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanningProblem {
    literals_per_step: u32,
    initial: Vec<i32>,
    invariant: Vec<i32>,
    goal: Vec<i32>,
    transfer: Vec<i32>,
}

impl PlanningProblem {
    /// A problem from templates, checked to be terminated and to stay within their blocks.
    ///
    /// ```rust
    /// # use incplan::problem::PlanningProblem;
    /// // A single bit which, once true, stays true.
    /// let problem = PlanningProblem::from_templates(1, vec![-1, 0], vec![], vec![1, 0], vec![-1, 2, 0]);
    /// assert!(problem.is_ok());
    ///
    /// let unterminated = PlanningProblem::from_templates(1, vec![-1], vec![], vec![1, 0], vec![]);
    /// assert!(unterminated.is_err());
    /// ```
    pub fn from_templates(
        literals_per_step: u32,
        initial: Vec<i32>,
        invariant: Vec<i32>,
        goal: Vec<i32>,
        transfer: Vec<i32>,
    ) -> Result<Self, err::ParseError> {
        let problem = PlanningProblem {
            literals_per_step,
            initial,
            invariant,
            goal,
            transfer,
        };

        for section in Section::ORDER {
            problem.check_section(section)?;
        }

        Ok(problem)
    }

    fn check_section(&self, section: Section) -> Result<(), err::ParseError> {
        let literals = self.section(section);
        let width = match section {
            Section::Transfer => 2 * self.literals_per_step,
            _ => self.literals_per_step,
        };

        if let Some(literal) = literals.iter().find(|l| l.unsigned_abs() > width) {
            return Err(err::ParseError::OutOfBlock {
                section: section.tag(),
                literal: *literal,
            });
        }

        match literals.last() {
            None | Some(0) => Ok(()),
            Some(_) => Err(err::ParseError::UnterminatedClause(section.tag())),
        }
    }

    /// The width of the block of literals of a single state.
    pub fn literals_per_step(&self) -> u32 {
        self.literals_per_step
    }

    /// The template of a section, with 0 terminating each clause.
    pub fn section(&self, section: Section) -> &[i32] {
        match section {
            Section::Initial => &self.initial,
            Section::Invariant => &self.invariant,
            Section::Goal => &self.goal,
            Section::Transfer => &self.transfer,
        }
    }

    pub fn initial(&self) -> &[i32] {
        &self.initial
    }

    pub fn invariant(&self) -> &[i32] {
        &self.invariant
    }

    pub fn goal(&self) -> &[i32] {
        &self.goal
    }

    pub fn transfer(&self) -> &[i32] {
        &self.transfer
    }

    /// The clauses of a section, without terminating zeros.
    pub fn clauses(&self, section: Section) -> impl Iterator<Item = &[i32]> {
        clauses_of(self.section(section))
    }
}

/// The clauses of a template, without terminating zeros.
pub(crate) fn clauses_of(template: &[i32]) -> impl Iterator<Item = &[i32]> {
    let body = match template.last() {
        Some(0) => &template[..template.len() - 1],
        _ => template,
    };
    let empty = template.is_empty();
    body.split(|literal| *literal == 0).filter(move |_| !empty)
}

#[cfg(test)]
mod problem_tests {
    use super::*;

    #[test]
    fn clause_splitting() {
        let problem =
            PlanningProblem::from_templates(2, vec![1, 0, -2, 1, 0], vec![], vec![2, 0], vec![-1, 3, 0])
                .unwrap();

        let initial = problem.clauses(Section::Initial).collect::<Vec<_>>();
        assert_eq!(initial, vec![&[1][..], &[-2, 1][..]]);
        assert_eq!(problem.clauses(Section::Invariant).count(), 0);
        assert_eq!(problem.clauses(Section::Transfer).count(), 1);
    }

    #[test]
    fn out_of_block() {
        let goal_next_step = PlanningProblem::from_templates(1, vec![1, 0], vec![], vec![2, 0], vec![-1, 2, 0]);
        assert_eq!(
            goal_next_step,
            Err(err::ParseError::OutOfBlock {
                section: 'g',
                literal: 2
            })
        );

        let transfer_too_wide = PlanningProblem::from_templates(1, vec![1, 0], vec![], vec![1, 0], vec![-3, 0]);
        assert!(transfer_too_wide.is_err());
    }
}
