//! LSC credential packager CLI
//!
//! Generates the installer artifacts used to provision local security
//! check accounts on managed hosts.
//!
//! # Usage
//!
//! ```bash
//! # Check that the external tools are available
//! lscpack check
//!
//! # Generate an RSA key pair, writing the private key
//! lscpack key --passphrase 'Secr3t!' -o lsc_key
//!
//! # Build an RPM that provisions a user with a public key
//! lscpack rpm --username alice --public-key alice.pub -o lsc.rpm
//!
//! # Build the DEB equivalent
//! lscpack deb --username alice --public-key alice.pub \
//!     --maintainer admin@example.org -o lsc.deb
//!
//! # Build a Windows installer that creates a local user
//! lscpack exe --username alice --password 'Secr3t!' -o lsc.exe
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use lscpack::{keys, package, preflight, Config};

#[derive(Parser)]
#[command(name = "lscpack")]
#[command(author, version, about = "LSC credential packager", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an RSA key pair and write the private key
    Key {
        /// Passphrase protecting the private key (longer than 4 characters)
        #[arg(short, long)]
        passphrase: String,
        /// Where to write the private key
        #[arg(short, long, default_value = "lsc_key")]
        output: PathBuf,
    },

    /// Build an RPM package that creates a user and installs a public key
    Rpm {
        /// Name of the user the package creates
        #[arg(short, long)]
        username: String,
        /// Path to the public key to install for the user
        #[arg(short = 'k', long)]
        public_key: PathBuf,
        /// Where to write the package
        #[arg(short, long, default_value = "lsc.rpm")]
        output: PathBuf,
    },

    /// Build a DEB package that creates a user and installs a public key
    Deb {
        /// Name of the user the package creates
        #[arg(short, long)]
        username: String,
        /// Path to the public key to install for the user
        #[arg(short = 'k', long)]
        public_key: PathBuf,
        /// Maintainer email address recorded in the package
        #[arg(short, long)]
        maintainer: String,
        /// Where to write the package
        #[arg(short, long, default_value = "lsc.deb")]
        output: PathBuf,
    },

    /// Build a Windows installer that creates a local user
    Exe {
        /// Name of the user the installer creates
        #[arg(short, long)]
        username: String,
        /// Password for the created user
        #[arg(short, long)]
        password: String,
        /// Where to write the installer
        #[arg(short, long, default_value = "lsc.exe")]
        output: PathBuf,
    },

    /// Check that the required external tools are available
    Check,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Key { passphrase, output } => cmd_key(&passphrase, &output),
        Commands::Rpm {
            username,
            public_key,
            output,
        } => cmd_rpm(&username, &public_key, &output),
        Commands::Deb {
            username,
            public_key,
            maintainer,
            output,
        } => cmd_deb(&username, &public_key, &maintainer, &output),
        Commands::Exe {
            username,
            password,
            output,
        } => cmd_exe(&username, &password, &output),
        Commands::Check => cmd_check(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn cmd_key(passphrase: &str, output: &Path) -> Result<()> {
    let config = Config::default();
    let key = keys::generate_private_key(&config, passphrase)?;
    write_artifact(output, &key)?;
    println!("Private key written to {}", output.display());
    Ok(())
}

fn cmd_rpm(username: &str, public_key: &Path, output: &Path) -> Result<()> {
    let config = Config::default();
    let key = read_public_key(public_key)?;
    let rpm = package::rpm::build(&config, username, &key)?;
    write_artifact(output, &rpm)?;
    println!("RPM written to {} ({} bytes)", output.display(), rpm.len());
    Ok(())
}

fn cmd_deb(username: &str, public_key: &Path, maintainer: &str, output: &Path) -> Result<()> {
    let config = Config::default();
    let key = read_public_key(public_key)?;
    let deb = package::deb::build(&config, username, &key, maintainer)?;
    write_artifact(output, &deb)?;
    println!("DEB written to {} ({} bytes)", output.display(), deb.len());
    Ok(())
}

fn cmd_exe(username: &str, password: &str, output: &Path) -> Result<()> {
    let config = Config::default();
    let exe = package::exe::build(&config, username, password)?;
    write_artifact(output, &exe)?;
    println!(
        "Installer written to {} ({} bytes)",
        output.display(),
        exe.len()
    );
    Ok(())
}

fn cmd_check() -> Result<()> {
    let config = Config::default();
    let results = preflight::check_tools(&config);

    let mut failed = 0;
    for check in &results {
        if check.passed {
            println!("  [ok]   {}: {}", check.name, check.message);
        } else {
            println!("  [FAIL] {}: {}", check.name, check.message);
            if let Some(suggestion) = &check.suggestion {
                println!("         fix: {}", suggestion);
            }
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} checks failed", failed, results.len());
    }
    println!("All tools available.");
    Ok(())
}

fn read_public_key(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
