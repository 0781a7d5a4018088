//! System metadata lookups used by the report footer.
//!
//! Host identity and memory are best-effort: callers get a `Result` and
//! render an empty field on failure. Everything else is either infallible
//! or propagates an I/O error.

use crate::error::ProbeError;
use std::net::{IpAddr, ToSocketAddrs};
use std::path::PathBuf;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Host name and the address it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub address: IpAddr,
}

impl std::fmt::Display for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.address)
    }
}

/// Physical memory in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    pub total: u64,
    pub free: u64,
}

impl Memory {
    /// Total memory as `"<n.n> GB"`.
    pub fn total_gb(&self) -> String {
        format_gb(self.total)
    }

    /// Free memory as `"<n.n> GB"`.
    pub fn free_gb(&self) -> String {
        format_gb(self.free)
    }
}

fn format_gb(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / BYTES_PER_GB)
}

/// Operating system and hardware descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Platform {
    /// OS name, e.g. `Linux` or `Darwin`.
    pub system: String,
    /// OS or kernel release.
    pub version: String,
    /// Full platform descriptor, `<os>-<kernel>-<arch>`.
    pub descriptor: String,
    /// Machine architecture.
    pub machine: String,
    /// Processor description (CPU brand string).
    pub processor: String,
}

/// Source of the metadata written in the footer.
pub trait Probe: Send {
    /// Hostname and resolved address.
    fn host(&self) -> Result<Host, ProbeError>;
    /// Total and free physical memory.
    fn memory(&self) -> Result<Memory, ProbeError>;
    /// Number of logical CPU cores.
    fn cpu_count(&self) -> std::io::Result<usize>;
    fn platform(&self) -> Platform;
    fn working_dir(&self) -> std::io::Result<PathBuf>;
}

/// Probe backed by the running operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl Probe for SystemProbe {
    fn host(&self) -> Result<Host, ProbeError> {
        let name = hostname::get()?.to_string_lossy().into_owned();
        let addrs: Vec<IpAddr> = (name.as_str(), 0)
            .to_socket_addrs()?
            .map(|addr| addr.ip())
            .collect();
        let address = addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or(ProbeError::Unavailable("host address"))?;
        Ok(Host { name, address })
    }

    fn memory(&self) -> Result<Memory, ProbeError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(ProbeError::Unavailable("memory introspection"));
        }
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        let total = sys.total_memory();
        if total == 0 {
            return Err(ProbeError::Unavailable("memory introspection"));
        }
        Ok(Memory {
            total,
            free: sys.free_memory(),
        })
    }

    fn cpu_count(&self) -> std::io::Result<usize> {
        std::thread::available_parallelism().map(|n| n.get())
    }

    fn platform(&self) -> Platform {
        let sys =
            System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
        let system = os_name();
        let kernel = System::kernel_version().unwrap_or_default();
        let machine = std::env::consts::ARCH.to_string();
        let descriptor = [system.as_str(), kernel.as_str(), machine.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("-");

        Platform {
            version: System::os_version().unwrap_or(kernel),
            system,
            descriptor,
            machine,
            processor: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .unwrap_or_default(),
        }
    }

    fn working_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }
}

fn os_name() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => other.to_string(),
    }
}
