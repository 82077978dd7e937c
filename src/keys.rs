//! SSH key-pair generation for local security check accounts.
//!
//! Keys are created by the external `ssh-keygen` tool inside a staging
//! directory; only the private key bytes survive the call. The passphrase
//! travels to the tool as a plain argument (what ssh-keygen accepts) but is
//! masked in all log output.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::config::Config;
use crate::error::{LscError, Result};
use crate::process::Cmd;
use crate::staging::with_staging;

/// Comment embedded in generated keys.
pub const KEY_COMMENT: &str = "Local security check key";

const KEY_TYPE: &str = "rsa";

/// ssh-keygen rejects shorter passphrases outright, so catch them before
/// doing any work.
const MIN_PASSPHRASE_LEN: usize = 5;

/// Generate an RSA key pair and return the private key bytes.
///
/// The key pair is written by `ssh-keygen` into a staging directory which
/// is removed before this returns, whatever the outcome.
pub fn generate_private_key(config: &Config, passphrase: &str) -> Result<Vec<u8>> {
    validate(KEY_COMMENT, passphrase)?;

    with_staging(&config.staging_base, "lsc_key", |staging| {
        let key_path = staging.join("key");
        create_ssh_key(config, KEY_COMMENT, passphrase, &key_path)?;
        fs::read(&key_path).map_err(|e| LscError::file("read", &key_path, e))
    })
}

/// Create an SSH key pair at `key_path` by invoking `ssh-keygen`.
///
/// The public key lands at `<key_path>.pub`. Parent directories are created
/// as needed with mode 0755.
pub fn create_ssh_key(
    config: &Config,
    comment: &str,
    passphrase: &str,
    key_path: &Path,
) -> Result<()> {
    validate(comment, passphrase)?;

    if let Some(dir) = key_path.parent() {
        fs::create_dir_all(dir).map_err(|e| LscError::file("create directory", dir, e))?;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755))
            .map_err(|e| LscError::file("set permissions on", dir, e))?;
    }

    Cmd::new(&config.ssh_keygen)
        .args(["-t", KEY_TYPE])
        .arg("-f")
        .arg_path(key_path)
        .arg("-C")
        .arg(comment)
        .arg("-P")
        .arg_secret(passphrase)
        .error_msg("is openssh installed?")
        .run()
}

fn validate(comment: &str, passphrase: &str) -> Result<()> {
    if comment.is_empty() {
        return Err(LscError::invalid("key comment must not be empty"));
    }
    if passphrase.len() < MIN_PASSPHRASE_LEN {
        return Err(LscError::invalid(
            "passphrase must be longer than 4 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn test_config(scratch: &Path, ssh_keygen: &Path) -> Config {
        Config {
            staging_base: scratch.join("staging"),
            ssh_keygen: ssh_keygen.display().to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_short_passphrase_rejected_before_io() {
        let scratch = tempfile::tempdir().unwrap();
        let config = Config {
            staging_base: scratch.path().join("staging"),
            ..Config::default()
        };

        let err = generate_private_key(&config, "abcd").unwrap_err();
        assert!(matches!(err, LscError::InvalidInput { .. }));
        // Rejected before any I/O: the staging base was never even created.
        assert!(!config.staging_base.exists());
    }

    #[test]
    fn test_empty_comment_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let config = Config::default();
        let err =
            create_ssh_key(&config, "", "long enough", &scratch.path().join("key")).unwrap_err();
        assert!(matches!(err, LscError::InvalidInput { .. }));
    }

    #[test]
    fn test_generate_reads_key_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let stub = write_stub(
            scratch.path(),
            "fake-ssh-keygen",
            "#!/bin/sh\nprintf 'FAKE PRIVATE KEY' > \"$4\"\nprintf 'FAKE PUBLIC KEY' > \"$4.pub\"\n",
        );
        let config = test_config(scratch.path(), &stub);

        let key = generate_private_key(&config, "Secr3t!").unwrap();
        assert_eq!(key, b"FAKE PRIVATE KEY");
        assert_eq!(fs::read_dir(&config.staging_base).unwrap().count(), 0);
    }

    #[test]
    fn test_nonzero_exit_fails_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let stub = write_stub(scratch.path(), "fake-ssh-keygen", "#!/bin/sh\nexit 3\n");
        let config = test_config(scratch.path(), &stub);

        let err = generate_private_key(&config, "Secr3t!").unwrap_err();
        assert!(matches!(err, LscError::Tool { .. }));
        assert_eq!(fs::read_dir(&config.staging_base).unwrap().count(), 0);
    }

    #[test]
    fn test_spawn_failure_fails_and_cleans_up() {
        let scratch = tempfile::tempdir().unwrap();
        let missing = scratch.path().join("no-such-tool");
        let config = test_config(scratch.path(), &missing);

        let err = generate_private_key(&config, "Secr3t!").unwrap_err();
        assert!(matches!(err, LscError::Spawn { .. }));
        assert_eq!(fs::read_dir(&config.staging_base).unwrap().count(), 0);
    }
}
