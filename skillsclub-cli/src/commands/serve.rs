//! HTTP server command for the skills catalog API

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use skillsclub_server::db::DEFAULT_MAX_CONNECTIONS;
use skillsclub_server::{build_state, run_server, CatalogConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Browser origin allowed by CORS; repeat for several (default: the UI on port 3000)
    #[arg(long = "cors-origin", value_name = "ORIGIN")]
    pub cors_origins: Vec<String>,

    /// Database URL (overrides DATABASE_URL from the environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind_addr: self.bind,
            cors_origins: if self.cors_origins.is_empty() {
                defaults.cors_origins
            } else {
                self.cors_origins.clone()
            },
            cors_permissive: self.cors_permissive,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    let catalog = CatalogConfig::from_env().with_database_url(args.database_url);

    tracing::info!("Starting skillsclub server on {}", args.bind);

    let state = build_state(&catalog, args.max_connections)
        .context("Failed to initialize application state")?;

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        ServeArgs::try_parse_from(std::iter::once("serve").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cors_origins_default_to_ui() {
        let config = parse(&[]).server_config();
        assert_eq!(config.bind_addr.port(), 3030);
        assert_eq!(config.cors_origins, skillsclub_server::DEFAULT_CORS_ORIGINS);
    }

    #[test]
    fn cors_origin_flag_repeats() {
        let config = parse(&[
            "--cors-origin",
            "https://a.example",
            "--cors-origin",
            "https://b.example",
        ])
        .server_config();
        assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
    }
}
