//! Single-instance lock using PID files
//!
//! Prevents two Baralga processes from writing the same data directory.

use std::fs;
use std::path::{Path, PathBuf};

use baralga_domain::{BaralgaError, Result};

/// Single-instance lock manager
#[derive(Debug)]
pub struct InstanceLock {
    pid_file: PathBuf,
}

impl InstanceLock {
    /// Take the lock at `lock_file`, replacing it if the owning process is gone.
    ///
    /// # Errors
    /// Returns `BaralgaError::Lock` if another live process holds the lock or
    /// the lock file cannot be written.
    pub fn acquire<P: AsRef<Path>>(lock_file: P) -> Result<Self> {
        let pid_file = lock_file.as_ref().to_path_buf();

        if pid_file.exists() {
            if let Ok(content) = fs::read_to_string(&pid_file) {
                if let Ok(pid) = content.trim().parse::<u32>() {
                    if pid == std::process::id() {
                        return Err(BaralgaError::Lock(format!(
                            "Lock already held by this process: {}",
                            pid_file.display()
                        )));
                    }
                    if Self::is_process_running(pid) {
                        tracing::warn!(existing_pid = pid, "instance_lock.process_active");
                        return Err(BaralgaError::Lock(format!(
                            "Another instance is already running (PID: {})",
                            pid
                        )));
                    }
                    tracing::warn!(stale_pid = pid, "instance_lock.stale_pid_file_detected");
                }
            }
            if let Err(err) = fs::remove_file(&pid_file) {
                tracing::warn!(error = %err, path = %pid_file.display(), "instance_lock.remove_stale_pid_failed");
            }
        }

        if let Some(parent) = pid_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                BaralgaError::Lock(format!("Failed to create lock directory: {}", e))
            })?;
        }

        let current_pid = std::process::id();
        fs::write(&pid_file, current_pid.to_string())
            .map_err(|e| BaralgaError::Lock(format!("Failed to create lock file: {}", e)))?;

        tracing::info!(pid = current_pid, path = %pid_file.display(), "instance_lock.acquired");

        Ok(Self { pid_file })
    }

    pub fn path(&self) -> &Path {
        &self.pid_file
    }

    #[cfg(unix)]
    fn is_process_running(pid: u32) -> bool {
        #[cfg(target_os = "linux")]
        {
            Path::new("/proc").join(pid.to_string()).exists()
        }

        #[cfg(not(target_os = "linux"))]
        {
            use std::process::Command;

            // `kill -0` probes for the process without signalling it
            Command::new("kill")
                .arg("-0")
                .arg(pid.to_string())
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }
    }

    #[cfg(not(unix))]
    fn is_process_running(pid: u32) -> bool {
        tracing::warn!(pid = pid, "instance_lock.process_check_unsupported");
        false
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.pid_file) {
            tracing::warn!(error = %e, path = %self.pid_file.display(), "instance_lock.remove_pid_failed");
        } else {
            tracing::info!(path = %self.pid_file.display(), "instance_lock.released");
        }
    }
}
