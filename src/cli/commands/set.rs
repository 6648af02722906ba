//! `conjure set` — add or overwrite a secret in the vault.

use crate::cli::output::{self, NameResponse};
use crate::cli::{master_password, open_vault, Cli};
use crate::errors::Result;
use crate::vault::Secret;

/// Execute the `set` command.
pub fn execute(cli: &Cli, secret: Secret) -> Result<()> {
    if !secret.password.is_empty() {
        output::warning("Password provided on command line — it may appear in shell history.");
    }

    let password = master_password(cli)?;
    let mut vault = open_vault(cli, password.as_bytes())?;

    let existed = vault.contains(&secret.name);
    vault.update(&secret)?;

    let op = if existed { "updated" } else { "added" };
    output::success(&format!(
        "Secret '{}' {op} ({} total)",
        secret.name,
        vault.secret_count()
    ));
    output::json(&NameResponse { name: &secret.name })
}
