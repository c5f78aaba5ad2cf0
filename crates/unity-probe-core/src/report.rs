//! Reporting outputs and failures back to the invoking pipeline.
//!
//! The default sink speaks the GitHub Actions runner protocol:
//!
//! ```text
//! ::group::Determining Unity project version
//! ::endgroup::
//! ::error::Found 2 matches for ProjectVersion.txt. Need exactly 1
//! ```
//!
//! Step outputs go to the file named by `GITHUB_OUTPUT` as heredoc records.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::{ProbeError, Result};

/// Destination for step outputs, log groups and failures.
pub trait OutputSink {
    /// Records a named output.
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Opens a collapsible log group.
    fn start_group(&mut self, _title: &str) {}

    /// Closes the current log group.
    fn end_group(&mut self) {}

    /// Emits an error annotation that does not by itself fail the run.
    fn annotate_error(&mut self, _message: &str) {}

    /// Marks the run as failed with a single message.
    fn set_failed(&mut self, message: &str);

    /// Flushes anything buffered after a successful run.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Escapes a workflow command message.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a workflow command property value.
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Formats one `GITHUB_OUTPUT` heredoc record.
///
/// # Errors
/// Returns [`ProbeError::Output`] if the delimiter occurs in the name or value.
pub fn output_record(name: &str, value: &str, delimiter: &str) -> Result<String> {
    if name.contains(delimiter) || value.contains(delimiter) {
        return Err(ProbeError::Output {
            name: name.to_string(),
            reason: format!("value contains delimiter {}", delimiter),
        });
    }
    Ok(format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter))
}

/// GitHub Actions workflow-command sink.
pub struct GithubActions<W: Write> {
    out: W,
    output_file: Option<PathBuf>,
}

impl<W: Write> GithubActions<W> {
    /// Creates a sink writing commands to `out` and outputs to `output_file`.
    ///
    /// Without an output file, outputs fall back to `::set-output` commands.
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        Self { out, output_file }
    }

    /// Consumes the sink and returns the command writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn command(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            warn!(error = %e, "Failed to write workflow command");
        }
    }

    fn append_to_file(path: &Path, name: &str, value: &str) -> Result<()> {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        let record = output_record(name, value, &delimiter)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ProbeError::io(path, e))?;
        file.write_all(record.as_bytes())
            .map_err(|e| ProbeError::io(path, e))
    }
}

impl<W: Write> OutputSink for GithubActions<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        debug!(name = %name, value = %value, "Setting output");
        match self.output_file.clone() {
            Some(path) => Self::append_to_file(&path, name, value),
            None => {
                let line = format!(
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(value)
                );
                writeln!(self.out, "{}", line).map_err(|e| ProbeError::Output {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn start_group(&mut self, title: &str) {
        self.command(&format!("::group::{}", escape_data(title)));
    }

    fn end_group(&mut self) {
        self.command("::endgroup::");
    }

    fn annotate_error(&mut self, message: &str) {
        self.command(&format!("::error::{}", escape_data(message)));
    }

    fn set_failed(&mut self, message: &str) {
        self.annotate_error(message);
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| ProbeError::Output {
            name: "stdout".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Sink that prints one JSON document when the run ends.
///
/// Success: `{"ok":true,"outputs":{...}}`. Failure:
/// `{"ok":false,"error":"...","diagnostics":[...],"outputs":{...}}`, where
/// `outputs` holds whatever was set before the failure.
pub struct JsonReport<W: Write> {
    out: W,
    outputs: Map<String, Value>,
    diagnostics: Vec<String>,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            outputs: Map::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Outputs recorded so far.
    pub fn outputs(&self) -> &Map<String, Value> {
        &self.outputs
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, document: &Value) -> Result<()> {
        let text = serde_json::to_string_pretty(document).map_err(|e| ProbeError::Output {
            name: "json".to_string(),
            reason: e.to_string(),
        })?;
        writeln!(self.out, "{}", text).map_err(|e| ProbeError::Output {
            name: "json".to_string(),
            reason: e.to_string(),
        })
    }
}

impl<W: Write> OutputSink for JsonReport<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.outputs
            .insert(name.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn annotate_error(&mut self, message: &str) {
        self.diagnostics.push(message.to_string());
    }

    fn set_failed(&mut self, message: &str) {
        let document = json!({
            "ok": false,
            "error": message,
            "diagnostics": self.diagnostics,
            "outputs": Value::Object(self.outputs.clone()),
        });
        if let Err(e) = self.emit(&document) {
            warn!(error = %e, "Failed to write failure report");
        }
    }

    fn finish(&mut self) -> Result<()> {
        let document = json!({
            "ok": true,
            "outputs": Value::Object(self.outputs.clone()),
        });
        self.emit(&document)
    }
}
