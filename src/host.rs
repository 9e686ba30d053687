//! System information summary
//!
//! Writes a short description of the machine a pipeline run happens on.
//! Emitting it right after a logger is created puts it at the top of the
//! log file:
//!
//! ```text
//! ---------- System Information Summary ----------
//! OS type = Linux
//! OS Version = 6.8.0-45-generic
//! Machine UserName = reduction01
//! Machine Processor Type = x86_64
//! Number of cores = 8
//! Total RAM [GB] = 23.54, % used = 15.9
//! tierlog Version = '0.1.0'
//! --------------------------------------------------
//! ```

use crate::error::{LogError, Result};
use crate::logger::Logger;
use crate::severity::Severity;

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Snapshot of the host
#[derive(Debug, Clone, PartialEq)]
pub struct HostInfo {
    /// Kernel name, e.g. `Linux`
    pub os_type: String,
    /// Kernel release
    pub os_release: String,
    /// Network host name
    pub hostname: String,
    /// Hardware architecture, e.g. `x86_64`
    pub machine: String,
    /// Logical CPUs available to the process
    pub cores: usize,
    pub total_memory_bytes: u64,
    /// Share of physical memory in use, 0-100
    pub memory_used_percent: f64,
    /// Version of this crate
    pub runtime_version: String,
}

impl HostInfo {
    /// Query the running host
    pub fn query() -> Result<Self> {
        let (os_type, os_release, hostname, machine) = platform::uname()?;
        let (total_memory_bytes, memory_used_percent) = platform::memory()?;
        let cores = std::thread::available_parallelism()
            .map_err(|e| LogError::HostQuery(format!("core count unavailable: {e}")))?
            .get();

        Ok(Self {
            os_type,
            os_release,
            hostname,
            machine,
            cores,
            total_memory_bytes,
            memory_used_percent,
            runtime_version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Lines of the summary block, separators included
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("{0} System Information Summary {0}", "-".repeat(10)),
            format!("OS type = {}", self.os_type),
            format!("OS Version = {}", self.os_release),
            format!("Machine UserName = {}", self.hostname),
            format!("Machine Processor Type = {}", self.machine),
            format!("Number of cores = {}", self.cores),
            format!(
                "Total RAM [GB] = {:.2}, % used = {:.1}",
                self.total_memory_bytes as f64 / BYTES_PER_GB,
                self.memory_used_percent
            ),
            format!("tierlog Version = '{}'", self.runtime_version),
            "-".repeat(50),
        ]
    }
}

/// Query the host and write the summary block at INFO
pub fn log_system_info(logger: &Logger) -> Result<()> {
    let info = HostInfo::query()?;
    for line in info.summary_lines() {
        logger.emit(Severity::Info, line)?;
    }
    Ok(())
}

/// `MemAvailable` from `/proc/meminfo` content, in bytes
#[cfg(any(target_os = "linux", test))]
fn mem_available_bytes(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|l| l.starts_with("MemAvailable:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib * 1024)
}

/// Share of `total` not available to new allocations, 0-100
#[cfg(any(target_os = "linux", test))]
fn used_percent(total: u64, available: u64) -> f64 {
    total.saturating_sub(available) as f64 * 100.0 / total as f64
}

#[cfg(target_os = "linux")]
mod platform {
    use std::ffi::CStr;

    use crate::error::{LogError, Result};

    fn field(raw: &[libc::c_char]) -> String {
        // SAFETY: uname fills every field with a NUL-terminated string.
        unsafe { CStr::from_ptr(raw.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    pub fn uname() -> Result<(String, String, String, String)> {
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut uts) } != 0 {
            return Err(LogError::HostQuery(format!(
                "uname failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        Ok((
            field(&uts.sysname),
            field(&uts.release),
            field(&uts.nodename),
            field(&uts.machine),
        ))
    }

    pub fn memory() -> Result<(u64, f64)> {
        let mut info: libc::sysinfo = unsafe { std::mem::zeroed() };
        if unsafe { libc::sysinfo(&mut info) } != 0 {
            return Err(LogError::HostQuery(format!(
                "sysinfo failed: {}",
                std::io::Error::last_os_error()
            )));
        }

        let unit = u64::from(info.mem_unit.max(1));
        let total = info.totalram as u64 * unit;
        if total == 0 {
            return Err(LogError::HostQuery("total memory reported as zero".into()));
        }

        // Kernels before 3.14 have no MemAvailable line.
        let available = std::fs::read_to_string("/proc/meminfo")
            .ok()
            .and_then(|meminfo| super::mem_available_bytes(&meminfo))
            .unwrap_or((info.freeram as u64 + info.bufferram as u64) * unit);

        Ok((total, super::used_percent(total, available)))
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    use crate::error::{LogError, Result};

    pub fn uname() -> Result<(String, String, String, String)> {
        Err(LogError::HostQuery(format!(
            "system information is not supported on {}",
            std::env::consts::OS
        )))
    }

    pub fn memory() -> Result<(u64, f64)> {
        Err(LogError::HostQuery(format!(
            "memory statistics are not supported on {}",
            std::env::consts::OS
        )))
    }
}
