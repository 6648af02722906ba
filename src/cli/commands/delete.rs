//! `conjure delete` — remove a secret from the vault.

use crate::cli::output::{self, NameResponse};
use crate::cli::{master_password, open_vault, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let password = master_password(cli)?;
    let mut vault = open_vault(cli, password.as_bytes())?;

    vault.delete(name)?;

    output::success(&format!(
        "Deleted secret '{name}' ({} left)",
        vault.secret_count()
    ));
    output::json(&NameResponse { name })
}
