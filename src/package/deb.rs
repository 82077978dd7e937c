//! DEB installer generation.
//!
//! Same workflow as the RPM builder, plus a maintainer address the creator
//! script embeds in the package control file.

use crate::config::Config;
use crate::error::Result;

const ARTIFACT_NAME: &str = "p.deb";

/// Build a DEB that creates `username` on the target host and installs
/// `public_key` for it. `maintainer` is the email address recorded in the
/// package metadata. Returns the raw package bytes.
pub fn build(
    config: &Config,
    username: &str,
    public_key: &str,
    maintainer: &str,
) -> Result<Vec<u8>> {
    super::build_with_creator(
        config,
        &config.deb_creator(),
        username,
        public_key,
        ARTIFACT_NAME,
        Some(maintainer),
        "dpkg-deb and fakeroot must be available to the creator script",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LscError;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    const PUBLIC_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2E bob@example.org\n";
    const MAINTAINER: &str = "admin@example.org";

    fn test_config(scratch: &Path) -> Config {
        Config {
            staging_base: scratch.join("staging"),
            data_dir: scratch.join("data"),
            ..Config::default()
        }
    }

    fn write_creator(config: &Config, body: &str) {
        fs::create_dir_all(&config.data_dir).unwrap();
        let path = config.deb_creator();
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_build_passes_maintainer_and_returns_bytes() {
        let scratch = tempfile::tempdir().unwrap();
        let config = test_config(scratch.path());
        let log = scratch.path().join("creator.log");
        write_creator(
            &config,
            &format!(
                "#!/bin/sh\nprintf '%s\\n' \"$@\" > {log}\npwd >> {log}\nprintf 'DEB BYTES' > \"$4\"\n",
                log = log.display()
            ),
        );

        let deb = build(&config, "bob", PUBLIC_KEY, MAINTAINER).unwrap();
        assert_eq!(deb, b"DEB BYTES");
        assert_eq!(fs::read_dir(&config.staging_base).unwrap().count(), 0);

        let logged = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = logged.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "bob");
        assert!(lines[1].ends_with("bob.pub"));
        assert!(lines[3].ends_with(ARTIFACT_NAME));
        assert_eq!(lines[4], MAINTAINER);
        assert_eq!(lines[5], lines[2]);
    }

    #[test]
    fn test_creator_failure_yields_no_artifact() {
        let scratch = tempfile::tempdir().unwrap();
        let config = test_config(scratch.path());
        write_creator(&config, "#!/bin/sh\nexit 2\n");

        let err = build(&config, "bob", PUBLIC_KEY, MAINTAINER).unwrap_err();
        assert!(matches!(err, LscError::Tool { .. }));
        assert_eq!(fs::read_dir(&config.staging_base).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_username_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let config = test_config(scratch.path());

        let err = build(&config, "", PUBLIC_KEY, MAINTAINER).unwrap_err();
        assert!(matches!(err, LscError::InvalidInput { .. }));
    }
}
