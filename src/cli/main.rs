use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::Parser;

use incplan::{
    config::Config,
    ipasir::{cadical::CadicalSolver, icnf::IcnfRecorder, scrambler::ScrambledSolver, Ipasir},
    planner::{PlanFormat, PlanOutcome, Planner, Report},
    problem::PlanningProblem,
    types::err,
};

mod args;

use args::{config_from_args, Args};

type Recording = IcnfRecorder<CadicalSolver, BufWriter<File>>;

fn read_problem(input: Option<&Path>) -> Result<PlanningProblem, String> {
    let read = match input {
        None => PlanningProblem::read(std::io::stdin().lock()),
        Some(path) if path == Path::new("-") => PlanningProblem::read(std::io::stdin().lock()),
        Some(path) => {
            let file = File::open(path).map_err(|e| format!("Failed to open {path:?}: {e}"))?;
            PlanningProblem::read(BufReader::new(file))
        }
    };
    read.map_err(|e| format!("Error reading problem: {}", err::ErrorKind::from(e)))
}

/// Plans with `solver`, writes the plan and any report, and returns the solver.
fn run<S: Ipasir>(args: &Args, problem: &PlanningProblem, config: Config, solver: S) -> Result<S, ExitCode> {
    let mut planner = match Planner::new(problem, config, solver) {
        Ok(planner) => planner,
        Err(e) => {
            println!("c {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    if let Some(limit) = args.time {
        let deadline = Instant::now() + limit;
        planner.set_terminator(Rc::new(move || Instant::now() >= deadline));
    }

    let outcome = match planner.solve() {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("c Planner error: {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let written = match &outcome {
        PlanOutcome::Found(plan) => {
            let format = match args.solver_like {
                true => PlanFormat::SolverLike,
                false => PlanFormat::PerStep,
            };
            plan.write(&mut stdout, format)
        }

        PlanOutcome::NoPlan { makespan } => {
            log::warn!("Did not find a plan up to makespan {makespan}");
            writeln!(stdout, "no solution")
        }

        PlanOutcome::Interrupted => {
            log::warn!("Interrupted before a plan was found");
            writeln!(stdout, "no solution")
        }
    };
    if let Err(e) = written {
        println!("c Failed to write the plan: {e}");
        return Err(ExitCode::FAILURE);
    }

    if let Some(path) = &args.report {
        let report = Report {
            solver: planner.solver().signature(),
            config: planner.config(),
            solves: planner.records(),
            final_makespan: match &outcome {
                PlanOutcome::Found(plan) => Some(plan.makespan() as u32),
                _ => None,
            },
            solved: matches!(outcome, PlanOutcome::Found(_)),
        };

        let written = File::create(path)
            .map_err(serde_json::Error::io)
            .and_then(|file| serde_json::to_writer_pretty(BufWriter::new(file), &report));
        if let Err(e) = written {
            println!("c Failed to write report to {path:?}: {e}");
            return Err(ExitCode::FAILURE);
        }
    }

    Ok(planner.into_solver())
}

/// Flushes a recording, noting any error met while recording.
fn finish_recording(recording: Recording) -> Result<(), ExitCode> {
    match recording.finish() {
        Ok(_) => Ok(()),
        Err(e) => {
            println!("c Failed to record: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    #[cfg(feature = "log")]
    env_logger::init();

    let args = Args::parse();

    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            println!("c Configuration error: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let problem = match read_problem(args.input.as_deref()) {
        Ok(problem) => problem,
        Err(message) => {
            println!("c {message}");
            return ExitCode::FAILURE;
        }
    };

    let writer = match &args.icnf {
        None => None,
        Some(path) => match File::create(path) {
            Ok(file) => Some(BufWriter::new(file)),
            Err(e) => {
                println!("c Unable to record to {path:?}: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let seed = args.scramble.map(|seed| {
        let seed = seed.unwrap_or_else(rand::random);
        println!("c Scrambling with seed {seed}");
        seed
    });

    // A recording is made of what CaDiCaL sees, and so the recording of a scrambled run is scrambled.
    let finished = match (writer, seed) {
        (None, None) => run(&args, &problem, config, CadicalSolver::default()).map(drop),

        (None, Some(seed)) => {
            let solver = ScrambledSolver::new(CadicalSolver::default(), seed);
            run(&args, &problem, config, solver).map(drop)
        }

        (Some(writer), None) => {
            let solver = IcnfRecorder::new(CadicalSolver::default(), writer);
            run(&args, &problem, config, solver).and_then(finish_recording)
        }

        (Some(writer), Some(seed)) => {
            let solver = ScrambledSolver::new(IcnfRecorder::new(CadicalSolver::default(), writer), seed);
            run(&args, &problem, config, solver).and_then(|solver| finish_recording(solver.into_inner()))
        }
    };

    match finished {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
