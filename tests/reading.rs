mod problems;

mod reading {

    use incplan::{
        config::{Config, Encoding},
        ipasir::{icnf::IcnfRecorder, cadical::CadicalSolver},
        planner::{PlanFormat, PlanOutcome, Planner},
        problem::PlanningProblem,
    };

    use crate::problems;

    #[test]
    fn read_and_plan() {
        let problem = PlanningProblem::read(problems::COUNTER_TEXT.as_bytes()).unwrap();
        assert_eq!(problem, problems::counter());

        let mut planner = Planner::new(&problem, Config::default(), CadicalSolver::default()).unwrap();
        let PlanOutcome::Found(plan) = planner.solve().unwrap() else {
            panic!("no plan");
        };

        assert_eq!(plan.to_string(), "solution 2 4\n-1 -2\n1 -2\n-1 2\n1 2\n");

        let mut solver_like = Vec::default();
        plan.write(&mut solver_like, PlanFormat::SolverLike).unwrap();
        assert_eq!(
            String::from_utf8(solver_like).unwrap(),
            "solution 2 4\n-1 -2 3 -4 -5 6 7 8\n"
        );
    }

    #[test]
    fn recorded_run() {
        let problem = problems::bit();
        let solver = IcnfRecorder::new(CadicalSolver::default(), Vec::new());

        let mut planner = Planner::new(&problem, Config::with_encoding(Encoding::SingleEnded), solver).unwrap();
        assert!(matches!(planner.solve(), Ok(PlanOutcome::Found(_))));

        let (_, recording) = planner.into_solver().finish().unwrap();
        let expected = "p inccnf\n-1 0\n-2 1 0\na 2 0\n-1 3 0\n-4 3 0\na 4 0\n";
        assert_eq!(String::from_utf8(recording).unwrap(), expected);
    }
}
