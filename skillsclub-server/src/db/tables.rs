//! Schema-qualified table identifiers

use crate::config::CatalogConfig;

/// Fully-qualified, quoted identifiers for the catalog tables.
///
/// Built from server configuration, never from request input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub repos: String,
    pub skills: String,
}

impl Tables {
    pub fn new(schema: &str, repos: &str, skills: &str) -> Self {
        Self {
            repos: qualify(schema, repos),
            skills: qualify(schema, skills),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.schema, &config.repos_table, &config.skills_table)
    }
}

fn qualify(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Quote a PostgreSQL identifier, doubling embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
