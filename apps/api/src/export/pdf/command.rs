//! External HTML → PDF conversion through a command-line tool
//! (`weasyprint` by default).

use std::io::Write;
use std::process::Command;

use tracing::{debug, info};

use crate::export::pdf::PdfConverter;
use crate::export::ExportError;

pub struct CommandConverter {
    program: String,
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PdfConverter for CommandConverter {
    fn name(&self) -> &'static str {
        "command"
    }

    fn convert(&self, html: &str, _title: &str) -> Result<Vec<u8>, ExportError> {
        let conversion = |what: &str, e: std::io::Error| {
            ExportError::Conversion(format!("{what}: {e}"))
        };

        let dir = tempfile::tempdir().map_err(|e| conversion("could not create temp dir", e))?;
        let input = dir.path().join("resume.html");
        let output = dir.path().join("resume.pdf");

        let mut file =
            std::fs::File::create(&input).map_err(|e| conversion("could not write input", e))?;
        file.write_all(html.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| conversion("could not write input", e))?;

        debug!(program = %self.program, input = %input.display(), "Running PDF converter");
        let result = Command::new(&self.program)
            .arg(&input)
            .arg(&output)
            .output()
            .map_err(|e| conversion(&format!("could not run '{}'", self.program), e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ExportError::Conversion(format!(
                "'{}' exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        let bytes =
            std::fs::read(&output).map_err(|e| conversion("converter produced no output", e))?;
        info!(program = %self.program, size_kb = bytes.len() / 1024, "External PDF conversion done");
        Ok(bytes)
    }
}
