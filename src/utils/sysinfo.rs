//! Host information for the `os` command.

use std::path::PathBuf;

use ::sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Line terminator used by the host platform.
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

/// Processor overview: count plus model and speed of the first CPU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuSummary {
    pub count: usize,
    pub model: String,
    pub speed_mhz: u64,
}

/// Query the processors of this machine.
pub fn cpu_summary() -> CpuSummary {
    let sys = System::new_with_specifics(
        RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
    );
    let cpus = sys.cpus();
    let first = cpus.first();
    let model = first
        .map(|cpu| cpu.brand().trim())
        .filter(|brand| !brand.is_empty())
        .unwrap_or("unknown")
        .to_string();
    let speed_mhz = first.map(|cpu| cpu.frequency()).unwrap_or(0);
    CpuSummary {
        count: cpus.len(),
        model,
        speed_mhz,
    }
}

/// Home directory of the current OS account.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Login name of the current OS account.
pub fn login_name() -> String {
    whoami::username()
}

/// CPU architecture identifier this binary was built for.
pub fn architecture() -> &'static str {
    std::env::consts::ARCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_summary_counts_processors() {
        let summary = cpu_summary();
        assert!(summary.count >= 1);
        assert!(!summary.model.is_empty());
    }

    #[test]
    fn test_architecture_matches_target() {
        assert_eq!(architecture(), std::env::consts::ARCH);
    }

    #[test]
    fn test_login_name_not_empty() {
        assert!(!login_name().is_empty());
    }
}
