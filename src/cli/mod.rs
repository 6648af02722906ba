//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::BasicCredentials;
use crate::config::Settings;
use crate::errors::{ConjureError, Result};
use crate::vault::Vault;

/// Conjure CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "conjure", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault storage directory (default: .conjure, or storage_root in .conjure.toml)
    #[arg(long, env = "CONJURE_STORAGE_ROOT", global = true)]
    pub storage_root: Option<PathBuf>,

    /// Authorization header value ("Basic <base64 user:password>") to take the master password from
    #[arg(long, global = true)]
    pub basic_auth: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List the names of all secrets (no password required)
    List,

    /// Decrypt and print a secret
    Get {
        /// Secret name
        name: String,
    },

    /// Create a secret or overwrite an existing one
    Set {
        /// Secret name
        name: String,
        #[arg(long, default_value = "")]
        username: String,
        /// Password stored in the secret (not the master password)
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Delete a secret
    Delete {
        /// Secret name
        name: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `--basic-auth` header value
/// 2. `CONJURE_PASSWORD` env var (scripts/CI)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn master_password(cli: &Cli) -> Result<Zeroizing<String>> {
    if let Some(header) = &cli.basic_auth {
        let creds = BasicCredentials::parse(header)?;
        return Ok(creds.password);
    }

    if let Ok(pw) = std::env::var("CONJURE_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| ConjureError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Open the vault selected by the CLI arguments and `.conjure.toml`.
///
/// A `--storage-root` flag wins over the config file; relative paths
/// resolve against the current directory.
pub fn open_vault(cli: &Cli, password: &[u8]) -> Result<Vault> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let root = match &cli.storage_root {
        Some(root) => cwd.join(root),
        None => settings.storage_root(&cwd),
    };

    Vault::open_with_params(&root, password, &settings.kdf_params())
}
