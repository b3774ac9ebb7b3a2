// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use anyhow::{Context, anyhow};
use clap::Parser;
use dotauth_core::{InMemoryProvider, PermissionVocabulary};
use dotauth_runtime::logging::setup_logging;
use dotauth_runtime::{LogFormat, RuntimeConfig, serve};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "dotauth")]
#[command(about = "Dotauth - permission authorization gRPC server")]
#[command(version)]
struct Cli {
    /// Address to bind the gRPC server to (overrides DOTAUTH_BIND_ADDR)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Comma-separated permission names the API accepts (overrides DOTAUTH_PERMISSIONS)
    #[arg(long)]
    permissions: Option<PermissionVocabulary>,

    /// Disable the gRPC reflection service
    #[arg(long)]
    no_reflection: bool,

    /// Log output format (overrides DOTAUTH_LOG_FORMAT)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn apply(self, config: &mut RuntimeConfig) {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(permissions) = self.permissions {
            config.vocabulary = permissions;
        }
        if self.no_reflection {
            config.enable_reflection = false;
        }
        if let Some(log_format) = self.log_format {
            config.log_format = log_format;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env().context("failed to load configuration")?;
    cli.apply(&mut config);

    setup_logging(&config.log_filter, config.log_format).map_err(|err| anyhow!("failed to initialize logging: {}", err))?;

    info!("Starting Dotauth permissions server");

    // Grants live in process memory; swap the provider to persist them
    let provider = Arc::new(InMemoryProvider::new());

    serve(config, provider, shutdown_signal()).await.context("permissions server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            error!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
