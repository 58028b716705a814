/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, each with one of the targets below.

Note, no log implementation is provided by the library.
The binary installs [env_logger](https://docs.rs/env_logger/latest/env_logger/) when built with the `log` feature, and so output can be narrowed with, e.g. `RUST_LOG=solve=info`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [timeline](crate::timeline)
    pub const TIMELINE: &str = "timeline";

    /// Logs related to [variable mapping](crate::mapping)
    pub const MAPPING: &str = "mapping";

    /// Logs related to the emission of clauses by the [planner](crate::planner)
    pub const ENCODING: &str = "encoding";

    /// Logs related to solve rounds
    pub const SOLVE: &str = "solve";

    /// Logs related to the [scrambler](crate::ipasir::scrambler)
    pub const SCRAMBLE: &str = "scramble";

    /// Logs related to [reading problems](crate::problem)
    pub const PARSE: &str = "parse";

    /// Logs related to [ICNF recording](crate::ipasir::icnf)
    pub const ICNF: &str = "icnf";
}
