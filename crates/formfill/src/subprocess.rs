//! Local subprocess transport for the fill backend.
//!
//! Invokes a fill command (`<command> <template.pdf> <data.json>
//! <output.pdf>`) instead of calling a remote service. The command is
//! expected to print a stats JSON object (`{"filled":..,"total":..,
//! "errors":[..]}`) on stdout; a missing or malformed stats line degrades
//! to `None` exactly like a missing HTTP stats header. The template store
//! side is a plain file-existence check against the template directory.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::client::{
    FillRequest, FillResponse, FillTransport, TemplateStore, TransportError, WireStats,
    body_excerpt,
};

/// How often a running fill process is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Fill backend run as a local subprocess.
#[derive(Debug, Clone)]
pub struct SubprocessFillBackend {
    command: PathBuf,
    template_dir: PathBuf,
    timeout: Duration,
}

impl SubprocessFillBackend {
    /// Create a subprocess backend with the default 30 s timeout.
    pub fn new(command: impl Into<PathBuf>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            template_dir: template_dir.into(),
            timeout: Duration::from_secs(crate::http::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the template artifact for a form type (`i-130.pdf` style).
    fn template_path(&self, form_type: &str) -> PathBuf {
        self.template_dir
            .join(format!("{}.pdf", form_type.to_lowercase()))
    }

    fn wait_bounded(
        &self,
        child: &mut std::process::Child,
    ) -> Result<std::process::ExitStatus, TransportError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TransportError::Timeout(self.timeout.as_secs()));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Drain a child pipe on its own thread so the child never blocks on a
/// full pipe buffer while the poll loop waits for it to exit.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

impl FillTransport for SubprocessFillBackend {
    fn fill(&self, request: &FillRequest) -> Result<FillResponse, TransportError> {
        let template = self.template_path(&request.form_type);
        if !template.is_file() {
            return Err(TransportError::Unreachable(format!(
                "no template file for {}: {}",
                request.form_type,
                template.display()
            )));
        }

        let workdir = tempfile::tempdir()?;
        let data_path = workdir.path().join("field-data.json");
        let output_path = workdir.path().join("filled.pdf");
        let data_json = serde_json::to_vec(&request.field_data)
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;
        std::fs::write(&data_path, data_json)?;

        let mut child = Command::new(&self.command)
            .arg(&template)
            .arg(&data_path)
            .arg(&output_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                TransportError::Unreachable(format!(
                    "failed to spawn {}: {e}",
                    self.command.display()
                ))
            })?;

        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());
        let status = self.wait_bounded(&mut child)?;
        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(TransportError::Rejected {
                status: status.code().unwrap_or(-1).unsigned_abs() as u16,
                body: body_excerpt(&stderr),
            });
        }

        let stats: Option<WireStats> = String::from_utf8_lossy(&stdout)
            .lines()
            .find_map(|line| serde_json::from_str(line.trim()).ok());

        let document = std::fs::read(&output_path).unwrap_or_default();
        Ok(FillResponse { document, stats })
    }
}

impl TemplateStore for SubprocessFillBackend {
    fn has_template(&self, form_type: &str) -> bool {
        self.template_path(form_type).is_file()
    }
}
