//! A wrapper which records calls to a solver in the incremental CNF (ICNF) format.
//!
//! The format is a `p inccnf` header followed by clauses, one per line and each terminated by 0, where each solve is written as a line `a <assumptions> 0`.
//! So, a recording may be replayed against any IPASIR solver to reproduce each solve of a run.
//!
//! Errors when writing do not interrupt the wrapped solver.
//! Instead, recording stops and the first error is kept, to be returned by [finish](IcnfRecorder::finish).
//!
//! ```rust
//! # use incplan::ipasir::{Ipasir, SolveResponse};
//! # use incplan::ipasir::icnf::IcnfRecorder;
//! # use incplan::ipasir::cadical::CadicalSolver;
//! let mut recorder = IcnfRecorder::new(CadicalSolver::default(), Vec::new());
//! recorder.add_clause(&[-1, 2]);
//! recorder.assume(1);
//! assert_eq!(recorder.solve(), SolveResponse::Sat);
//!
//! let (_, written) = recorder.finish().unwrap();
//! assert_eq!(String::from_utf8(written).unwrap(), "p inccnf\n-1 2 0\na 1 0\n");
//! ```

use std::io::Write;

use crate::{
    ipasir::{Ipasir, LearnCallback, LitValue, SolveResponse, TerminateCallback},
    misc::log::targets,
};

/// A solver `S`, with each call recorded to `W`.
pub struct IcnfRecorder<S: Ipasir, W: Write> {
    solver: S,
    writer: W,
    assumptions: Vec<i32>,
    error: Option<std::io::Error>,
}

impl<S: Ipasir, W: Write> IcnfRecorder<S, W> {
    pub fn new(solver: S, writer: W) -> Self {
        let mut recorder = IcnfRecorder {
            solver,
            writer,
            assumptions: Vec::default(),
            error: None,
        };
        recorder.record(|writer| writeln!(writer, "p inccnf"));
        recorder
    }

    fn record(&mut self, f: impl FnOnce(&mut W) -> std::io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = f(&mut self.writer) {
            log::warn!(target: targets::ICNF, "Recording stopped: {e}");
            self.error = Some(e);
        }
    }

    /// Flushes the recording, returning the solver and writer, or the first error met when writing.
    pub fn finish(mut self) -> std::io::Result<(S, W)> {
        self.record(|writer| writer.flush());
        match self.error {
            Some(e) => Err(e),
            None => Ok((self.solver, self.writer)),
        }
    }
}

impl<S: Ipasir, W: Write> Ipasir for IcnfRecorder<S, W> {
    fn signature(&self) -> String {
        self.solver.signature()
    }

    fn add(&mut self, lit_or_zero: i32) {
        match lit_or_zero {
            0 => self.record(|writer| writeln!(writer, "0")),
            literal => self.record(|writer| write!(writer, "{literal} ")),
        }
        self.solver.add(lit_or_zero);
    }

    fn assume(&mut self, literal: i32) {
        self.assumptions.push(literal);
        self.solver.assume(literal);
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = std::mem::take(&mut self.assumptions);
        self.record(|writer| {
            write!(writer, "a ")?;
            for literal in &assumptions {
                write!(writer, "{literal} ")?;
            }
            writeln!(writer, "0")
        });
        self.solver.solve()
    }

    fn val(&mut self, literal: i32) -> LitValue {
        self.solver.val(literal)
    }

    fn failed(&mut self, literal: i32) -> bool {
        self.solver.failed(literal)
    }

    fn set_terminate(&mut self, callback: Option<TerminateCallback>) {
        self.solver.set_terminate(callback)
    }

    fn set_learn(&mut self, max_length: usize, callback: Option<LearnCallback>) {
        self.solver.set_learn(max_length, callback)
    }

    fn reset(&mut self) {
        self.assumptions.clear();
        self.record(|writer| writeln!(writer, "c reset"));
        self.solver.reset();
    }
}

#[cfg(test)]
mod icnf_tests {
    use super::*;
    use crate::ipasir::cadical::CadicalSolver;

    #[test]
    fn solves_are_recorded() {
        let mut recorder = IcnfRecorder::new(CadicalSolver::default(), Vec::new());
        recorder.add_clause(&[1, -2]);
        recorder.assume(2);
        assert_eq!(recorder.solve(), SolveResponse::Sat);
        assert_eq!(recorder.val(1), LitValue::True);

        recorder.add_clause(&[-1]);
        assert_eq!(recorder.solve(), SolveResponse::Sat);

        let (_, written) = recorder.finish().unwrap();
        let expected = "p inccnf\n1 -2 0\na 2 0\n-1 0\na 0\n";
        assert_eq!(String::from_utf8(written).unwrap(), expected);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("broken"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_recording_is_flushed_on_finish() {
        use crate::ipasir::scrambler::ScrambledSolver;

        let recorder = IcnfRecorder::new(CadicalSolver::default(), std::io::BufWriter::new(Vec::new()));
        let mut solver = ScrambledSolver::new(recorder, 5);
        solver.add_clause(&[1, 2]);
        solver.assume(-1);
        assert_eq!(solver.solve(), SolveResponse::Sat);

        let (_, writer) = solver.into_inner().finish().unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let lines = written.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "p inccnf");
        assert!(lines[2].starts_with("a "));
    }

    #[test]
    fn write_errors_do_not_stop_the_solver() {
        let mut recorder = IcnfRecorder::new(CadicalSolver::default(), Broken);
        recorder.add_clause(&[1]);
        recorder.add_clause(&[-1]);
        assert_eq!(recorder.solve(), SolveResponse::Unsat);
        assert!(recorder.finish().is_err());
    }
}
