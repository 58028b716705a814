//! Plans, as read from a satisfying assignment.

use std::io::Write;

use crate::problem::{PlanningProblem, Section};

/// How a plan is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanFormat {
    /// One line per step, each with the literals of the step in `[1, L]`.
    #[default]
    PerStep,

    /// A single line, with the literals of step `t` shifted into `(t * L, (t + 1) * L]`, as a solver would report a model.
    SolverLike,
}

/// A plan, as a sequence of states.
///
/// Each state holds one literal for each of the `L` problem variables, with the literal for variable `i` at position `i - 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    literals_per_step: u32,
    steps: Vec<Vec<i32>>,
}

impl Plan {
    pub fn new(literals_per_step: u32, steps: Vec<Vec<i32>>) -> Self {
        Plan {
            literals_per_step,
            steps,
        }
    }

    pub fn literals_per_step(&self) -> u32 {
        self.literals_per_step
    }

    pub fn steps(&self) -> &[Vec<i32>] {
        &self.steps
    }

    /// The count of transitions of the plan.
    pub fn makespan(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether `literal` holds at `step`.
    fn holds(&self, step: usize, literal: i32) -> bool {
        let position = literal.unsigned_abs() as usize;
        match position.checked_sub(1) {
            None => false,
            Some(index) => self.steps[step].get(index) == Some(&literal),
        }
    }

    fn satisfies<'c>(&self, mut clauses: impl Iterator<Item = &'c [i32]>, literal_at: impl Fn(i32) -> (usize, i32)) -> bool {
        clauses.all(|clause| {
            clause.iter().any(|literal| {
                let (step, literal) = literal_at(*literal);
                self.holds(step, literal)
            })
        })
    }

    /// Checks the plan against each template of `problem`.
    ///
    /// The initial template must hold of the first state, the invariant of each state, the goal of the last state, and the transfer of each consecutive pair of states.
    pub fn is_valid_for(&self, problem: &PlanningProblem) -> bool {
        let width = self.literals_per_step as usize;
        if problem.literals_per_step() != self.literals_per_step
            || self.steps.is_empty()
            || self.steps.iter().any(|step| step.len() != width)
        {
            return false;
        }

        let last = self.steps.len() - 1;
        let width = width as i32;

        if !self.satisfies(problem.clauses(Section::Initial), |literal| (0, literal)) {
            return false;
        }

        if !self.satisfies(problem.clauses(Section::Goal), |literal| (last, literal)) {
            return false;
        }

        for step in 0..self.steps.len() {
            if !self.satisfies(problem.clauses(Section::Invariant), |literal| (step, literal)) {
                return false;
            }
        }

        for step in 0..last {
            let transfer = |literal: i32| match literal.abs() <= width {
                true => (step, literal),
                false => (step + 1, literal - literal.signum() * width),
            };
            if !self.satisfies(problem.clauses(Section::Transfer), transfer) {
                return false;
            }
        }

        true
    }

    /// Writes the plan, preceded by a header `solution <L> <steps>`.
    pub fn write(&self, writer: &mut impl Write, format: PlanFormat) -> std::io::Result<()> {
        writeln!(writer, "solution {} {}", self.literals_per_step, self.steps.len())?;

        match format {
            PlanFormat::PerStep => {
                for step in &self.steps {
                    let line = step.iter().map(|literal| literal.to_string()).collect::<Vec<_>>();
                    writeln!(writer, "{}", line.join(" "))?;
                }
            }

            PlanFormat::SolverLike => {
                let width = self.literals_per_step as i32;
                let mut line = Vec::with_capacity(self.steps.len() * width as usize);
                for (time, step) in self.steps.iter().enumerate() {
                    let offset = time as i32 * width;
                    for literal in step {
                        line.push((literal + literal.signum() * offset).to_string());
                    }
                }
                writeln!(writer, "{}", line.join(" "))?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buffer = Vec::default();
        self.write(&mut buffer, PlanFormat::PerStep)
            .map_err(|_| std::fmt::Error)?;
        write!(f, "{}", String::from_utf8_lossy(&buffer))
    }
}
