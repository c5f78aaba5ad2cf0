//! unity-probe CLI library.
//!
//! Wires the command-line surface to the probe pipeline and converts the
//! first error into the single failure report.

pub mod cli;

use std::io::Write;

use tracing::error;
use unity_probe_core::{GithubActions, Inputs, JsonReport, OutputSink, Probe, ProbeError};

use crate::cli::{Cli, OutputFormat};

/// Builds the output sink selected on the command line.
pub fn make_sink<W: Write + 'static>(cli: &Cli, out: W) -> Box<dyn OutputSink> {
    match cli.format {
        OutputFormat::Github => Box::new(GithubActions::new(out, cli.output_file.clone())),
        OutputFormat::Json => Box::new(JsonReport::new(out)),
    }
}

/// Runs one probe and reports the outcome to `sink`.
///
/// Returns the process exit code: 0 on success, 1 after a failure was
/// reported.
pub fn run(cli: &Cli, sink: &mut dyn OutputSink) -> i32 {
    let result = match Inputs::resolve(cli.raw_inputs()) {
        Ok(inputs) => Probe::new(inputs).run(sink).map(|_| ()),
        Err(e) => Err(e),
    };

    match result.and_then(|()| sink.finish()) {
        Ok(()) => 0,
        Err(e) => {
            report_failure(sink, &e);
            1
        }
    }
}

/// Reports each diagnostic, then the failure message.
pub fn report_failure(sink: &mut dyn OutputSink, err: &ProbeError) {
    for candidate in err.candidates() {
        sink.annotate_error(&candidate.display().to_string());
    }
    error!(error = %err, "Probe failed");
    sink.set_failed(&err.to_string());
}
