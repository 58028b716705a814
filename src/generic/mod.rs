//! Generic structures, not specific to planning.

pub mod minimal_pcg;
