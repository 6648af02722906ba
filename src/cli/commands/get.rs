//! `conjure get` — decrypt and print a single secret.

use crate::cli::output;
use crate::cli::{master_password, open_vault, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let password = master_password(cli)?;
    let vault = open_vault(cli, password.as_bytes())?;

    let secret = vault.get(name)?;
    output::json(&secret)
}
