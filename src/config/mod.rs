/*!
Configuration of a planner.

All configuration of a [planner](crate::planner::Planner) is contained in a [Config], which is fixed when the planner is built.
Options which take a value from some range are held as [ConfigOption]s, and options which only make sense together are checked by [Config::validate].
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod schedule;
pub use schedule::MakespanSchedule;

use crate::{mapping::HelperPlacement, types::err::ConfigError};

/// How the timeline of a plan grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Grow from the initial state, asserting the goal at the most recent time point of each round.
    SingleEnded,

    /// Grow from the initial state and from the goal, linking the two frontiers each round.
    #[default]
    DoubleEnded,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleEnded => write!(f, "single-ended"),
            Self::DoubleEnded => write!(f, "double-ended"),
        }
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Config {
    /// How the timeline grows.
    pub encoding: Encoding,

    /// The share of time points grown from the start, for a double ended encoding.
    pub ratio: ConfigOption<f64>,

    /// Where helper variables are placed relative to problem variables.
    pub helper_placement: HelperPlacement,

    /// Time slots reserved for helper blocks when all helper blocks are placed before the problem blocks.
    pub helper_reservation: ConfigOption<u32>,

    /// The makespan targeted in each round.
    pub schedule: MakespanSchedule,

    /// Assume goal literals which form unit clauses, rather than adding guarded clauses.
    ///
    /// Single ended encoding only.
    pub unit_goal_assumption: bool,

    /// Make an additional solve before goal or link clauses are added.
    pub intermediate_solve: bool,

    /// Rebuild the encoding from scratch each round.
    pub non_incremental: bool,

    /// Assert the negation of each activation literal after the round it was used in fails.
    pub clean_literal: bool,

    /// Stop once the makespan would exceed this value.
    pub max_makespan: Option<u32>,

    /// Stop after this many rounds.
    pub max_rounds: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            encoding: Encoding::default(),

            ratio: ConfigOption {
                name: "ratio",
                min: 0.0,
                max: 1.0,
                value: 0.5,
            },

            helper_placement: HelperPlacement::default(),

            helper_reservation: ConfigOption {
                name: "helper_reservation",
                min: 1,
                max: u32::MAX,
                value: 1024,
            },

            schedule: MakespanSchedule::default(),

            unit_goal_assumption: false,
            intermediate_solve: false,
            non_incremental: false,
            clean_literal: false,

            max_makespan: None,
            max_rounds: None,
        }
    }
}

impl Config {
    /// A default configuration with the given encoding.
    pub fn with_encoding(encoding: Encoding) -> Self {
        Config {
            encoding,
            ..Config::default()
        }
    }

    /// Checks the options are within bounds and consistent with one another.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ratio.in_bounds() {
            return Err(ConfigError::OutOfRange(self.ratio.name));
        }

        if !self.helper_reservation.in_bounds() {
            return Err(ConfigError::OutOfRange(self.helper_reservation.name));
        }

        self.schedule.validate()?;

        if self.unit_goal_assumption && self.encoding != Encoding::SingleEnded {
            return Err(ConfigError::UnitGoalAssumptionRequiresSingleEnded);
        }

        Ok(())
    }

    /// The number of time slots to reserve for helper blocks placed before all problem blocks.
    ///
    /// A makespan limit fixes the number of time points, and otherwise the configured reservation is used.
    pub fn reserved_slots(&self) -> u32 {
        match self.max_makespan {
            Some(limit) => limit.saturating_add(2),
            None => self.helper_reservation.value,
        }
    }
}
