//! Reporting sinks for evaluation output.
//!
//! The harness returns plain data; sinks own all presentation. Anything that
//! can accept the ordered trial sequence and the summary can render a run,
//! whether to a terminal, a file or a test buffer.

use std::io::{self, Write};

use crate::eval::{Summary, TrialResult};

/// Output channel for a completed evaluation run.
pub trait ReportSink {
    /// Render the ordered trial sequence and its summary.
    fn report(&mut self, results: &[TrialResult], summary: &Summary) -> io::Result<()>;
}

/// Plain-text report: a fixed-width per-trial metric table followed by the
/// summary panel.
pub struct TextReport<W: Write> {
    writer: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn report(&mut self, results: &[TrialResult], summary: &Summary) -> io::Result<()> {
        writeln!(self.writer, "{:>5}  {:>9}  {:>9}  {:>9}", "trial", "accuracy", "f1", "z-score")?;
        for result in results {
            writeln!(
                self.writer,
                "{:>5}  {:>9.4}  {:>9.4}  {:>9.4}",
                result.trial, result.accuracy, result.f1, result.stability
            )?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", summary.interpretation)?;
        Ok(())
    }
}
