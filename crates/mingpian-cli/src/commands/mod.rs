//! Subcommands of the `mingpian` binary.

pub mod batch;
pub mod config;
pub mod parse;
pub mod search;
pub mod upload;

use clap::Args;

use mingpian_core::StoreConfig;
use mingpian_store::{Credentials, API_KEY_VAR, BASE_ID_VAR};

/// Airtable connection options shared by `upload` and `search`.
#[derive(Args)]
pub struct StoreArgs {
    /// Airtable personal access token
    #[arg(long, env = API_KEY_VAR, hide_env_values = true)]
    api_key: Option<String>,

    /// Airtable base ID
    #[arg(long, env = BASE_ID_VAR)]
    base_id: Option<String>,

    /// Table name (overrides the config file)
    #[arg(long)]
    table: Option<String>,
}

impl StoreArgs {
    /// Credentials from flags or the environment.
    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        let api_key = self.api_key.clone().unwrap_or_default();
        let base_id = self.base_id.clone().unwrap_or_default();
        Ok(Credentials::new(api_key, base_id)?)
    }

    /// Apply command-line overrides and check the result.
    pub fn apply(&self, store: &mut StoreConfig) -> anyhow::Result<()> {
        if let Some(table) = &self.table {
            store.table_name = table.clone();
        }
        store.validate()?;
        Ok(())
    }
}
