use std::path::PathBuf;

use clap::Parser;

use incplan::{
    config::{Config, Encoding},
    mapping::HelperPlacement,
    types::err::ConfigError,
};

/// Search for a plan of a transition system with an incremental SAT solver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The planning problem, read from stdin if omitted or '-'
    pub input: Option<PathBuf>,

    /// The share of time points grown from the start of the plan, when double ended
    #[arg(short, long, default_value_t = 0.5)]
    pub ratio: f64,

    /// The linear step of the makespan schedule
    #[arg(short, long, default_value_t = 1)]
    pub linear_step: u32,

    /// The exponential basis of the makespan schedule, 0 for none
    #[arg(short, long, default_value_t = 0.0)]
    pub exponential_basis: f64,

    /// The exponential offset of the makespan schedule
    #[arg(short = 'o', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub exponential_offset: f64,

    /// Assume unit goal clauses rather than adding guarded clauses (single ended only)
    #[arg(short, long, default_value_t = false)]
    pub unit_goal_assumption: bool,

    /// Solve once more each round, before the goal or link clauses are added
    #[arg(short, long, default_value_t = false)]
    pub intermediate_solve: bool,

    /// Rebuild the encoding from scratch each round
    #[arg(short, long, default_value_t = false)]
    pub non_incremental: bool,

    /// Assert the negation of the activation literal of each failed round
    #[arg(short, long, default_value_t = false)]
    pub clean_literal: bool,

    /// Grow the plan from the start only
    #[arg(short, long, default_value_t = false)]
    pub single_ended: bool,

    /// Write the plan on one line, with the literals of step t in (t * L, (t + 1) * L]
    #[arg(long, default_value_t = false)]
    pub solver_like: bool,

    /// Where helper variables are placed
    #[arg(long, default_value_t, value_enum)]
    pub helper_placement: HelperPlacement,

    /// Time slots reserved for helper variables placed before all problem variables
    #[arg(long, default_value_t = 1024)]
    pub helper_reservation: u32,

    /// Give up once this makespan has been tried
    #[arg(long)]
    pub max_makespan: Option<u32>,

    /// Give up after this many rounds
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Time limit for the search
    #[arg(short, long, value_parser = |seconds: &str| seconds.parse().map(std::time::Duration::from_secs))]
    pub time: Option<std::time::Duration>,

    /// Scramble variables and clauses before they reach the solver, with a random seed if none is given
    #[arg(long, num_args = 0..=1)]
    pub scramble: Option<Option<u64>>,

    /// Record each call to the solver to a file, in the ICNF format
    #[arg(long)]
    pub icnf: Option<PathBuf>,

    /// Write a JSON report of the solves made to a file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

pub fn config_from_args(args: &Args) -> Result<Config, ConfigError> {
    let encoding = match args.single_ended {
        true => Encoding::SingleEnded,
        false => Encoding::DoubleEnded,
    };

    let mut the_config = Config::with_encoding(encoding);

    the_config.ratio.set(args.ratio)?;
    the_config.helper_placement = args.helper_placement;
    the_config.helper_reservation.set(args.helper_reservation)?;

    the_config.schedule.linear_step.set(args.linear_step)?;
    the_config.schedule.exponential_basis.set(args.exponential_basis)?;
    the_config.schedule.exponential_offset.set(args.exponential_offset)?;

    the_config.unit_goal_assumption = args.unit_goal_assumption;
    the_config.intermediate_solve = args.intermediate_solve;
    the_config.non_incremental = args.non_incremental;
    the_config.clean_literal = args.clean_literal;

    the_config.max_makespan = args.max_makespan;
    the_config.max_rounds = args.max_rounds;

    the_config.validate()?;
    Ok(the_config)
}
