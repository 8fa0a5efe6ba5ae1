//! Runs the site toolchain as a child process.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info, instrument};

use campex_core::{
    application::{
        ApplicationError,
        ports::{BuildRequest, BuildResult, BuildRunner, output::ENV_CONTENT_OVERRIDE_DIR},
    },
    error::ExportResult,
};

/// Stderr kept for error reports. Older output is dropped past this.
pub const DEFAULT_STDERR_LIMIT: usize = 1024 * 1024;

/// Spawns `<program> <args...>` in the workspace with the build environment.
///
/// There is no timeout: the build runs until it exits or the future is
/// dropped, which kills the child.
#[derive(Debug, Clone)]
pub struct ProcessBuildRunner {
    program: String,
    args: Vec<String>,
    stderr_limit: usize,
}

impl ProcessBuildRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stderr_limit: DEFAULT_STDERR_LIMIT,
        }
    }

    pub fn with_stderr_limit(mut self, limit: usize) -> Self {
        self.stderr_limit = limit;
        self
    }

    fn command(&self, request: &BuildRequest) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(&request.workspace)
            .envs(request.env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // a persisted campaign must not pick up an override from our own env
        if request.content_override.is_none() {
            command.env_remove(ENV_CONTENT_OVERRIDE_DIR);
        }
        command
    }
}

#[async_trait]
impl BuildRunner for ProcessBuildRunner {
    #[instrument(
        skip_all,
        fields(
            program = %self.program,
            workspace = %request.workspace.display(),
            campaign_id = %request.campaign_id,
            variant_id = %request.variant_id
        )
    )]
    async fn build(&self, request: &BuildRequest) -> ExportResult<BuildResult> {
        let started = Instant::now();
        let mut child = self
            .command(request)
            .spawn()
            .map_err(|e| ApplicationError::SpawnFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (status, (), stderr) = tokio::join!(
            child.wait(),
            forward_stdout(stdout),
            collect_stderr(stderr, self.stderr_limit),
        );

        let status = status.map_err(|e| ApplicationError::SpawnFailed {
            program: self.program.clone(),
            reason: format!("failed waiting for process: {e}"),
        })?;
        // killed by a signal has no code
        let exit_code = status.code().unwrap_or(-1);
        let elapsed = started.elapsed();

        if exit_code != 0 {
            error!(exit_code, elapsed_ms = elapsed.as_millis() as u64, "Build failed");
            return Err(ApplicationError::build_failed(exit_code, stderr).into());
        }

        info!(elapsed_ms = elapsed.as_millis() as u64, "Build finished");
        Ok(BuildResult {
            exit_code,
            stderr,
            elapsed,
        })
    }
}

async fn forward_stdout<R: AsyncRead + Unpin>(stream: Option<R>) {
    let Some(stream) = stream else { return };
    drain_lines(stream, |line| debug!(target: "campex::build::stdout", "{line}")).await;
}

async fn collect_stderr<R: AsyncRead + Unpin>(stream: Option<R>, limit: usize) -> String {
    let Some(stream) = stream else {
        return String::new();
    };
    let mut buffer = TailBuffer::new(limit);
    drain_lines(stream, |line| {
        error!(target: "campex::build::stderr", "{line}");
        buffer.push_line(line);
    })
    .await;
    buffer.into_string()
}

/// Reads `stream` to EOF, one line at a time.
///
/// Lines are decoded lossily so a stray non-UTF-8 byte never stops the
/// reader; closing the pipe early would kill the toolchain with SIGPIPE.
async fn drain_lines<R, F>(stream: R, mut on_line: F)
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = BufReader::new(stream);
    let mut raw = Vec::new();
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&raw);
                on_line(line.trim_end_matches(['\n', '\r']));
            }
            Err(e) => {
                debug!(error = %e, "Toolchain output stream closed");
                break;
            }
        }
    }
}

/// Keeps the last `limit` bytes of text, cut on a char boundary.
#[derive(Debug)]
struct TailBuffer {
    text: String,
    limit: usize,
}

impl TailBuffer {
    fn new(limit: usize) -> Self {
        Self {
            text: String::new(),
            limit,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');

        if self.text.len() > self.limit {
            let mut cut = self.text.len() - self.limit;
            while !self.text.is_char_boundary(cut) {
                cut += 1;
            }
            self.text.drain(..cut);
        }
    }

    fn into_string(self) -> String {
        self.text
    }
}
