//! `conjure list` — print the names of all secrets.

use crate::cli::output::{self, ListResponse};
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `list` command.
///
/// Names are not treated as sensitive, so the vault is opened without a
/// password.  Anyone who can run this against a storage root learns
/// which secrets exist.
pub fn execute(cli: &Cli) -> Result<()> {
    let vault = open_vault(cli, b"")?;
    let names = vault.list();

    output::json(&ListResponse { secrets: &names })
}
