#![allow(dead_code)]

use incplan::problem::PlanningProblem;

/// A problem, with the least makespan of a plan, if there is a plan.
pub struct Case {
    pub name: &'static str,
    pub problem: PlanningProblem,
    pub makespan: Option<usize>,
}

/// A bit, initially false, which should be true, and which stays true once true.
pub fn bit() -> PlanningProblem {
    PlanningProblem::from_templates(1, vec![-1, 0], vec![], vec![1, 0], vec![-1, 2, 0]).unwrap()
}

/// A two bit counter, from 00 to 11.
pub fn counter() -> PlanningProblem {
    PlanningProblem::from_templates(
        2,
        vec![-1, 0, -2, 0],
        vec![],
        vec![1, 0, 2, 0],
        vec![
            1, 3, 0, -1, -3, 0, -4, 2, 1, 0, -4, -2, -1, 0, 4, -2, 1, 0, 4, 2, -1, 0,
        ],
    )
    .unwrap()
}

pub const COUNTER_TEXT: &str = "c two bit counter
i cnf 2 2
-1 0 -2 0
u cnf 2 0
g cnf 2 2
1 0 2 0
t cnf 4 6
1 3 0 -1 -3 0
-4 2 1 0 -4 -2 -1 0 4 -2 1 0 4 2 -1 0
";

/// A token on three positions in a row, which moves at most one position each step, from the first position to the last.
pub fn token() -> PlanningProblem {
    PlanningProblem::from_templates(
        3,
        vec![1, 0, -2, 0, -3, 0],
        vec![1, 2, 3, 0, -1, -2, 0, -1, -3, 0, -2, -3, 0],
        vec![3, 0],
        vec![-1, 4, 5, 0, -2, 4, 5, 6, 0, -3, 5, 6, 0],
    )
    .unwrap()
}

/// A bit, initially false, which should be true, though never changes.
pub fn constant() -> PlanningProblem {
    PlanningProblem::from_templates(1, vec![-1, 0], vec![], vec![1, 0], vec![-1, 2, 0, 1, -2, 0]).unwrap()
}

pub fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "bit",
            problem: bit(),
            makespan: Some(1),
        },
        Case {
            name: "counter",
            problem: counter(),
            makespan: Some(3),
        },
        Case {
            name: "token",
            problem: token(),
            makespan: Some(2),
        },
        Case {
            name: "constant",
            problem: constant(),
            makespan: None,
        },
    ]
}

/// Whether a plan with exactly `makespan` steps exists, by hand.
pub fn has_plan_of(name: &str, makespan: usize) -> bool {
    match name {
        "bit" => makespan >= 1,
        "counter" => makespan % 4 == 3,
        "token" => makespan >= 2,
        _ => false,
    }
}
