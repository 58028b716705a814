//! Error types used in the library.
//!
//! - Parse errors are fatal and are returned before any planning takes place.
//! - Timeline and mapping errors are contract violations. A correctly configured planner never sees them, though they are returned rather than panicking.
//! - Configuration errors are found when a planner is built, never mid-solve.
//!
//! Not finding a plan within some limit is not an error, see [PlanOutcome](crate::planner::PlanOutcome).
//!
//! Names of the error enums --- for the most part --- overlap with the module they concern.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::timeline::TimePoint;

#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    Config(ConfigError),
    Mapping(MappingError),
    Parse(ParseError),
    Planner(PlannerError),
    Timeline(TimelineError),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e:?}"),
            Self::Mapping(e) => write!(f, "mapping error: {e:?}"),
            Self::Parse(e) => write!(f, "input error: {e:?}"),
            Self::Planner(e) => write!(f, "planner error: {e:?}"),
            Self::Timeline(e) => write!(f, "timeline error: {e:?}"),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Noted errors in a configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Some option was given a value outside of its bounds.
    OutOfRange(&'static str),

    /// The makespan schedule would not grow without bound.
    StagnantSchedule,

    /// Goal units may only be assumed when the goal is asserted at a single growing end.
    UnitGoalAssumptionRequiresSingleEnded,
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Errors when translating a template literal to a solver variable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MappingError {
    /// The absolute value of the template literal exceeds the width of its block.
    LiteralOutOfBlock(i32),

    /// Every slot reserved for helper blocks placed before all problem blocks is in use.
    HelperReservationExhausted,

    /// The solver variable would not fit in an `i32`.
    VariableOverflow,
}

impl From<MappingError> for ErrorKind {
    fn from(e: MappingError) -> Self {
        ErrorKind::Mapping(e)
    }
}

/// Errors when reading a planning problem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// No section header was found, the input is empty or only comments.
    Empty,

    /// A malformed section header at some line.
    Header(usize),

    /// The header of a section did not carry the expected tag.
    UnexpectedSection { line: usize, expected: char, found: char },

    /// The literal count of a section header is inconsistent with earlier sections.
    LiteralCount { line: usize, expected: u32, found: u32 },

    /// Something that is not a literal at some line.
    Literal(usize),

    /// A literal lies outside of the block of its section.
    OutOfBlock { section: char, literal: i32 },

    /// A section ended in the middle of a clause.
    UnterminatedClause(char),

    /// A section was never given.
    MissingSection(char),

    /// Reading from the source failed at some line.
    Line(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors in the use of a planner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlannerError {
    /// A plan was requested though the most recent solve was not satisfiable.
    NotSolved,
}

impl From<PlannerError> for ErrorKind {
    fn from(e: PlannerError) -> Self {
        ErrorKind::Planner(e)
    }
}

/// Errors when addressing time points.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimelineError {
    /// The time point was not produced by the manager, or is not (yet) valid for it.
    InvalidArgument(TimePoint),

    /// The time point is valid, though the requested neighbour does not exist.
    OutOfRange(TimePoint),
}

impl From<TimelineError> for ErrorKind {
    fn from(e: TimelineError) -> Self {
        ErrorKind::Timeline(e)
    }
}
