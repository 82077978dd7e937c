//! Installer package builders.
//!
//! Each builder produces one artifact kind:
//!
//! - `rpm` - RPM that creates a user and installs a public key for it
//! - `deb` - DEB that creates a user and installs a public key for it
//! - `exe` - Windows NSIS installer that creates a local user
//!
//! RPM and DEB share the creator-script workflow below; the EXE path
//! generates an NSIS script and compiles it with `makensis`.

pub mod deb;
pub mod exe;
pub mod rpm;

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::error::{LscError, Result};
use crate::process::Cmd;
use crate::staging::with_staging;

/// Stage `public_key` and run `creator` over it, returning the produced
/// package bytes.
///
/// Three staging directories mirror the creator scripts' expectations: one
/// holds the caller's public key as `key.pub`, one receives the finished
/// artifact, and one is the build directory the script runs in, holding the
/// key renamed to `<username>.pub`.
fn build_with_creator(
    config: &Config,
    creator: &Path,
    username: &str,
    public_key: &str,
    artifact_name: &str,
    maintainer: Option<&str>,
    hint: &str,
) -> Result<Vec<u8>> {
    if username.is_empty() {
        return Err(LscError::invalid("username must not be empty"));
    }

    with_staging(&config.staging_base, "lsc_pkg_key", |key_staging| {
        let public_key_path = key_staging.join("key.pub");
        fs::write(&public_key_path, public_key)
            .map_err(|e| LscError::file("write", &public_key_path, e))?;

        with_staging(&config.staging_base, "lsc_pkg_out", |out_staging| {
            let artifact = out_staging.join(artifact_name);
            run_creator(
                config,
                creator,
                username,
                &public_key_path,
                &artifact,
                maintainer,
                hint,
            )?;
            debug!("reading artifact {}", artifact.display());
            fs::read(&artifact).map_err(|e| LscError::file("read", &artifact, e))
        })
    })
}

/// Run the creator script in its own build directory.
///
/// Argument order is fixed by the scripts: username, staged public key,
/// build directory, destination path, and (DEB only) the maintainer
/// address.
fn run_creator(
    config: &Config,
    creator: &Path,
    username: &str,
    public_key_path: &Path,
    artifact: &Path,
    maintainer: Option<&str>,
    hint: &str,
) -> Result<()> {
    with_staging(&config.staging_base, "lsc_pkg_build", |build| {
        let staged_key = build.join(format!("{username}.pub"));
        fs::copy(public_key_path, &staged_key)
            .map_err(|e| LscError::file("copy public key to", &staged_key, e))?;

        let mut cmd = Cmd::new(creator)
            .arg(username)
            .arg_path(&staged_key)
            .arg_path(build.path())
            .arg_path(artifact)
            .current_dir(build.path())
            .error_msg(hint);
        if let Some(maintainer) = maintainer {
            cmd = cmd.arg(maintainer);
        }
        cmd.run()
    })
}
