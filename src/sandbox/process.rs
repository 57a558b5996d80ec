//! Low-level process execution under a wall-clock deadline
//!
//! Spawns one command with piped stdio, feeds it input, caps how much output
//! is captured, samples peak resident memory while it runs, and kills the
//! whole process group when the deadline expires. The deadline is the limit:
//! there is no grace period.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::time::MissedTickBehavior;

/// One process invocation
pub(crate) struct ProcessSpec<'a> {
    /// argv; the first element is the program
    pub argv: &'a [String],
    /// Working directory
    pub dir: &'a Path,
    /// Bytes piped to the child's stdin; `None` closes stdin immediately
    pub stdin: Option<&'a str>,
    /// Wall-clock deadline; the process group is killed on expiry
    pub time_limit: Duration,
    /// Address-space cap in kilobytes, applied before exec
    pub memory_limit_kb: Option<u64>,
    /// Cap on captured bytes per stream; the rest is drained and discarded
    pub output_cap: usize,
    /// Interval between peak-RSS samples
    pub sample_interval: Duration,
}

/// What one finished (or killed) invocation produced
#[derive(Debug)]
pub(crate) struct RawRun {
    /// `None` when the deadline killed the process
    pub status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
    pub wall_time: Duration,
    /// Peak resident set observed while the process ran, in kilobytes
    pub peak_memory_kb: u64,
}

/// Infrastructure failures distinct from anything the judged program did
#[derive(Debug, thiserror::Error)]
pub(crate) enum RunError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("empty command line")]
    EmptyCommand,
}

/// Run one process to completion or to its deadline
pub(crate) async fn run(spec: ProcessSpec<'_>) -> Result<RawRun, RunError> {
    let (program, args) = spec.argv.split_first().ok_or(RunError::EmptyCommand)?;

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(spec.dir)
        .stdin(if spec.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    apply_unix_limits(&mut command, spec.memory_limit_kb);

    let mut child = command.spawn().map_err(|source| RunError::Spawn {
        program: program.clone(),
        source,
    })?;
    let pid = child.id();

    // Feed stdin from a task so a program that never reads does not wedge us;
    // dropping the handle closes the pipe and delivers EOF.
    if let Some(input) = spec.stdin {
        if let Some(mut stdin) = child.stdin.take() {
            let bytes = input.as_bytes().to_vec();
            tokio::spawn(async move {
                let _ = stdin.write_all(&bytes).await;
                let _ = stdin.shutdown().await;
            });
        }
    }

    // Drain stdout/stderr concurrently with waiting, otherwise a chatty child
    // blocks on a full pipe and turns into a bogus timeout.
    let stdout_task = child
        .stdout
        .take()
        .map(|reader| tokio::spawn(read_capped(reader, spec.output_cap)));
    let stderr_task = child
        .stderr
        .take()
        .map(|reader| tokio::spawn(read_capped(reader, spec.output_cap)));

    let mut sampler = tokio::time::interval(spec.sample_interval);
    sampler.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let deadline = tokio::time::sleep(spec.time_limit);
    tokio::pin!(deadline);

    let start = Instant::now();
    let mut peak_memory_kb = 0u64;

    let status = loop {
        tokio::select! {
            status = child.wait() => {
                break Some(status.map_err(|source| RunError::Io {
                    program: program.clone(),
                    source,
                })?);
            }
            _ = &mut deadline => {
                kill_process_group(&mut child, pid).await;
                break None;
            }
            _ = sampler.tick() => {
                if let Some(kb) = sample_peak_rss(pid) {
                    peak_memory_kb = peak_memory_kb.max(kb);
                }
            }
        }
    };
    let wall_time = start.elapsed();

    let stdout = match stdout_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };
    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    Ok(RawRun {
        status,
        stdout,
        stderr,
        wall_time,
        peak_memory_kb,
    })
}

/// Put the child in its own process group and cap its address space
#[cfg(unix)]
fn apply_unix_limits(command: &mut Command, memory_limit_kb: Option<u64>) {
    use nix::sys::resource::{Resource, setrlimit};
    use nix::unistd::setsid;

    let limit_bytes = memory_limit_kb.map(|kb| kb.saturating_mul(1024));
    unsafe {
        command.pre_exec(move || {
            // Own process group so the whole tree dies on deadline expiry
            setsid().map_err(|e| std::io::Error::from_raw_os_error(e as i32))?;
            if let Some(bytes) = limit_bytes {
                setrlimit(Resource::RLIMIT_AS, bytes, bytes)
                    .map_err(|e| std::io::Error::from_raw_os_error(e as i32))?;
            }
            Ok(())
        });
    }
}

/// Forcibly terminate the child and everything it spawned
async fn kill_process_group(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    if let Some(pid) = pid {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;
        // The child leads its own group (setsid above); grandchildren go too
        let _ = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL);
    }
    #[cfg(not(unix))]
    let _ = pid;

    let _ = child.start_kill();
    let _ = child.wait().await;
}

/// Read a stream to EOF, keeping at most `cap` bytes
async fn read_capped<R: AsyncRead + Unpin>(mut reader: R, cap: usize) -> String {
    let mut collected: Vec<u8> = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if collected.len() < cap {
                    let take = n.min(cap - collected.len());
                    collected.extend_from_slice(&buf[..take]);
                }
                // Past the cap we keep draining so the child never stalls
            }
        }
    }
    String::from_utf8_lossy(&collected).into_owned()
}

/// Peak resident set of a live process in kilobytes, from the kernel
#[cfg(target_os = "linux")]
fn sample_peak_rss(pid: Option<u32>) -> Option<u64> {
    let pid = pid?;
    let status = std::fs::read_to_string(format!("/proc/{pid}/status")).ok()?;
    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmHWM:") {
            return rest.trim().trim_end_matches("kB").trim().parse().ok();
        }
    }
    None
}

#[cfg(not(target_os = "linux"))]
fn sample_peak_rss(_pid: Option<u32>) -> Option<u64> {
    None
}
