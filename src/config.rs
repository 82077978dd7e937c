//! Runtime configuration for package generation.
//!
//! Everything an operation touches outside its own staging directory is
//! injectable here: the base directory staging directories are created
//! under, the data directory holding the RPM/DEB creator scripts, and the
//! names of the external tools. Tests point these at scratch directories
//! and stub scripts; production code uses [`Config::default`].

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the creator-script data directory.
pub const DATA_DIR_ENV: &str = "LSCPACK_DATA_DIR";

/// Default location of the creator scripts.
const DEFAULT_DATA_DIR: &str = "/usr/local/share/lscpack";

/// Filename of the RPM creator script inside the data directory.
pub const RPM_CREATOR: &str = "lsc-rpm-creator.sh";

/// Filename of the DEB creator script inside the data directory.
pub const DEB_CREATOR: &str = "lsc-deb-creator.sh";

/// Configuration shared by all package-generation operations.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory under which per-operation staging directories are
    /// created. Defaults to the system temp directory.
    pub staging_base: PathBuf,
    /// Directory holding the RPM/DEB creator scripts.
    pub data_dir: PathBuf,
    /// Name or path of the ssh-keygen executable.
    pub ssh_keygen: String,
    /// Name or path of the NSIS compiler.
    pub makensis: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging_base: env::temp_dir(),
            data_dir: env::var_os(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ssh_keygen: "ssh-keygen".to_string(),
            makensis: "makensis".to_string(),
        }
    }
}

impl Config {
    /// Full path of the RPM creator script.
    pub fn rpm_creator(&self) -> PathBuf {
        self.data_dir.join(RPM_CREATOR)
    }

    /// Full path of the DEB creator script.
    pub fn deb_creator(&self) -> PathBuf {
        self.data_dir.join(DEB_CREATOR)
    }
}
