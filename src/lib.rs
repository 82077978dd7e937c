//! Local security check (LSC) credential package generation.
//!
//! Produces the artifacts used to provision LSC accounts on managed hosts:
//! SSH key pairs, RPM and DEB installers that create a user and authorize a
//! public key for it, and Windows NSIS installers that create a local user
//! with a password.
//!
//! Every operation follows the same shape: stage inputs in a uniquely-named
//! staging directory, invoke one external tool, read the produced artifact
//! back into memory, and remove the staging directory on every exit path.
//! Operations are stateless and safe to run concurrently; each call owns
//! its staging directories outright.

pub mod config;
pub mod error;
pub mod keys;
pub mod package;
pub mod preflight;
pub mod process;
pub mod staging;

pub use config::Config;
pub use error::{LscError, Result};
