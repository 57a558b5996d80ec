//! Execution backend
//!
//! Compiles a submitted program once per submission and runs it against
//! individual inputs under the problem's wall-clock deadline, returning a
//! structured outcome per run. The backend is stateless and knows nothing
//! about problems or submissions; every invocation gets a private workspace
//! that is removed on all exit paths.

pub mod languages;
mod process;

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::fs;

use crate::config::SandboxConfig;
use crate::models::Language;
use process::{ProcessSpec, RawRun, RunError};

/// Resource budget for one execution
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimits {
    /// Wall-clock deadline per run; expiry forcibly terminates the process
    pub time_limit: Duration,
    /// Address-space ceiling per run, in kilobytes
    pub memory_limit_kb: u64,
}

/// Classification of one finished execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Toolchain rejected the source
    CompileError,
    /// Abnormal exit before the deadline
    RuntimeError,
    /// Killed at the deadline
    TimeExceeded,
    /// Ran to completion with exit code zero
    Success,
}

/// What one execution produced
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub status: ExecutionStatus,
    pub stdout: String,
    pub stderr: String,
    /// Measured wall-clock runtime in milliseconds
    pub runtime_ms: u64,
    /// Peak resident memory in kilobytes, zero when unavailable
    pub memory_kb: u64,
    /// Exit code; negative signal number for signal deaths, `None` on timeout
    pub exit_code: Option<i32>,
}

impl ExecutionOutcome {
    fn compile_error(diagnostics: String, runtime_ms: u64) -> Self {
        Self {
            status: ExecutionStatus::CompileError,
            stdout: String::new(),
            stderr: diagnostics,
            runtime_ms,
            memory_kb: 0,
            exit_code: None,
        }
    }
}

/// Result of preparing one submission for execution
pub enum Prepared {
    /// Toolchain produced a runnable program
    Ready(Box<dyn PreparedProgram>),
    /// Compilation failed; diagnostics are in the outcome's stderr
    CompileError(ExecutionOutcome),
}

/// Compiles sources and runs programs on behalf of the evaluation pipeline
///
/// Implementations must be safely callable from concurrently running
/// evaluations. Infrastructure failures (cannot create a workspace, cannot
/// spawn the toolchain) surface as errors; everything the judged program
/// does wrong surfaces inside an [`ExecutionOutcome`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Compile one submission's source into a runnable program
    ///
    /// Compilation happens once per submission; the returned program is then
    /// run once per test case.
    async fn prepare(
        &self,
        source: &str,
        language: Language,
        limits: ResourceLimits,
    ) -> Result<Prepared>;
}

/// A compiled (or syntax-checked) program ready to run against inputs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreparedProgram: Send + Sync {
    /// Run the program once with `input` piped to stdin
    async fn run(&self, input: &str) -> Result<ExecutionOutcome>;
}

/// Process-based execution backend
///
/// Thin sandbox: a private temp directory per submission, the input piped to
/// stdin, an address-space cap before exec, and a process-group kill at the
/// deadline. Stronger isolation (namespaces, cgroups) would slot in behind
/// the same trait.
pub struct ProcessSandbox {
    config: SandboxConfig,
}

impl ProcessSandbox {
    /// Create a sandbox with the given configuration
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.config.memory_sample_interval_ms)
    }
}

#[async_trait]
impl ExecutionBackend for ProcessSandbox {
    async fn prepare(
        &self,
        source: &str,
        language: Language,
        limits: ResourceLimits,
    ) -> Result<Prepared> {
        let workspace = tempfile::Builder::new()
            .prefix("judge-")
            .tempdir()
            .context("failed to create sandbox workspace")?;

        let source_path = workspace.path().join(languages::source_file_name(language));
        fs::write(&source_path, source)
            .await
            .context("failed to write source file")?;

        if let Some(argv) = languages::compile_command(language) {
            let raw = process::run(ProcessSpec {
                argv: &argv,
                dir: workspace.path(),
                stdin: None,
                time_limit: Duration::from_millis(self.config.compile_timeout_ms),
                memory_limit_kb: None,
                output_cap: self.config.output_limit_bytes,
                sample_interval: self.sample_interval(),
            })
            .await
            .context("failed to run compiler")?;

            match raw.status {
                // A compiler stuck past its bound is charged to the submission:
                // pathological sources can legitimately wedge a compiler
                None => {
                    let diagnostics = format!(
                        "compilation exceeded the {} ms build limit",
                        self.config.compile_timeout_ms
                    );
                    return Ok(Prepared::CompileError(ExecutionOutcome::compile_error(
                        diagnostics,
                        raw.wall_time.as_millis() as u64,
                    )));
                }
                Some(status) if !status.success() => {
                    let diagnostics = if raw.stderr.is_empty() {
                        raw.stdout
                    } else {
                        raw.stderr
                    };
                    return Ok(Prepared::CompileError(ExecutionOutcome::compile_error(
                        diagnostics,
                        raw.wall_time.as_millis() as u64,
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Prepared::Ready(Box::new(CompiledProgram {
            workspace,
            argv: languages::run_command(language),
            limits,
            output_cap: self.config.output_limit_bytes,
            sample_interval: self.sample_interval(),
        })))
    }
}

/// A program compiled into its private workspace
///
/// Dropping this removes the workspace, which covers every exit path of an
/// evaluation including panics and early returns.
struct CompiledProgram {
    workspace: TempDir,
    argv: Vec<String>,
    limits: ResourceLimits,
    output_cap: usize,
    sample_interval: Duration,
}

#[async_trait]
impl PreparedProgram for CompiledProgram {
    async fn run(&self, input: &str) -> Result<ExecutionOutcome> {
        let raw = match process::run(ProcessSpec {
            argv: &self.argv,
            dir: self.workspace.path(),
            stdin: Some(input),
            time_limit: self.limits.time_limit,
            memory_limit_kb: Some(self.limits.memory_limit_kb),
            output_cap: self.output_cap,
            sample_interval: self.sample_interval,
        })
        .await
        {
            Ok(raw) => raw,
            // The address-space cap can reject the program image at exec;
            // that is the limit working, not an infrastructure failure
            Err(RunError::Spawn { source, .. })
                if source.kind() == std::io::ErrorKind::OutOfMemory =>
            {
                return Ok(ExecutionOutcome {
                    status: ExecutionStatus::RuntimeError,
                    stdout: String::new(),
                    stderr: "process rejected by the memory limit".to_string(),
                    runtime_ms: 0,
                    memory_kb: self.limits.memory_limit_kb,
                    exit_code: None,
                });
            }
            Err(e) => return Err(e).context("failed to execute program"),
        };

        Ok(classify(raw))
    }
}

/// Map a finished run onto the outcome vocabulary
fn classify(raw: RawRun) -> ExecutionOutcome {
    let runtime_ms = raw.wall_time.as_millis() as u64;

    let Some(status) = raw.status else {
        // Killed at the deadline; no output guarantee, keep what was captured
        return ExecutionOutcome {
            status: ExecutionStatus::TimeExceeded,
            stdout: raw.stdout,
            stderr: raw.stderr,
            runtime_ms,
            memory_kb: raw.peak_memory_kb,
            exit_code: None,
        };
    };

    if status.success() {
        return ExecutionOutcome {
            status: ExecutionStatus::Success,
            stdout: raw.stdout,
            stderr: raw.stderr,
            runtime_ms,
            memory_kb: raw.peak_memory_kb,
            exit_code: Some(0),
        };
    }

    let mut stderr = raw.stderr;
    let exit_code;

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            exit_code = Some(-signal);
            if stderr.is_empty() {
                stderr = format!("killed by signal {signal}");
            }
        } else {
            exit_code = status.code();
            if stderr.is_empty() {
                stderr = format!("process exited with code {}", status.code().unwrap_or(-1));
            }
        }
    }
    #[cfg(not(unix))]
    {
        exit_code = status.code();
        if stderr.is_empty() {
            stderr = format!("process exited with code {}", status.code().unwrap_or(-1));
        }
    }

    ExecutionOutcome {
        status: ExecutionStatus::RuntimeError,
        stdout: raw.stdout,
        stderr,
        runtime_ms,
        memory_kb: raw.peak_memory_kb,
        exit_code,
    }
}
