//! Records of solves, and a report of a run.

use std::time::Duration;

use crate::{config::Config, ipasir::SolveResponse};

fn as_seconds<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// A record of a single call to solve.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SolveRecord {
    /// The round the solve was made in.
    pub round: u32,

    /// The makespan at the time of the solve.
    pub makespan: u32,

    pub response: SolveResponse,

    /// Wall clock time spent in the solver.
    #[serde(serialize_with = "as_seconds")]
    pub duration: Duration,

    /// Whether the solve was made before the goal or link clauses were added.
    pub intermediate: bool,
}

/// A summary of a run, for writing as JSON.
#[derive(Debug, serde::Serialize)]
pub struct Report<'r> {
    /// The signature of the solver used.
    pub solver: String,

    pub config: &'r Config,

    pub solves: &'r [SolveRecord],

    /// The makespan of the plan found, if any.
    pub final_makespan: Option<u32>,

    pub solved: bool,
}
