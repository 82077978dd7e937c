//! RPM installer generation.
//!
//! The actual packaging is done by the external creator script; this module
//! stages the inputs and collects the result.

use crate::config::Config;
use crate::error::Result;

const ARTIFACT_NAME: &str = "p.rpm";

/// Build an RPM that creates `username` on the target host and installs
/// `public_key` for it. Returns the raw package bytes.
pub fn build(config: &Config, username: &str, public_key: &str) -> Result<Vec<u8>> {
    super::build_with_creator(
        config,
        &config.rpm_creator(),
        username,
        public_key,
        ARTIFACT_NAME,
        None,
        "rpmbuild must be available to the creator script",
    )
}
