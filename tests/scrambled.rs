mod problems;

mod scrambled {

    use incplan::{
        config::{Config, Encoding},
        ipasir::{cadical::CadicalSolver, scrambler::ScrambledSolver},
        planner::{PlanOutcome, Planner},
    };

    use crate::problems;

    #[test]
    fn makespan_is_independent_of_names_and_order() {
        for case in problems::cases() {
            for encoding in [Encoding::SingleEnded, Encoding::DoubleEnded] {
                let mut config = Config::with_encoding(encoding);
                config.max_makespan = Some(5);

                let mut planner = Planner::new(&case.problem, config.clone(), CadicalSolver::default()).unwrap();
                let plain = planner.solve().unwrap();

                for seed in 1..=5 {
                    let solver = ScrambledSolver::new(CadicalSolver::default(), seed);
                    let mut planner = Planner::new(&case.problem, config.clone(), solver).unwrap();

                    match (planner.solve().unwrap(), &plain) {
                        (PlanOutcome::Found(scrambled), PlanOutcome::Found(plain)) => {
                            assert_eq!(scrambled.makespan(), plain.makespan(), "{} seed {seed}", case.name);
                            assert!(scrambled.is_valid_for(&case.problem));
                        }

                        (scrambled, plain) => assert_eq!(&scrambled, plain, "{} seed {seed}", case.name),
                    }
                }
            }
        }
    }

    #[test]
    fn non_incremental_scrambled() {
        let problem = problems::token();
        let mut config = Config::default();
        config.non_incremental = true;

        let solver = ScrambledSolver::new(CadicalSolver::default(), 73);
        let mut planner = Planner::new(&problem, config, solver).unwrap();

        let PlanOutcome::Found(plan) = planner.solve().unwrap() else {
            panic!("no plan");
        };
        assert_eq!(plan.makespan(), 2);
    }
}
