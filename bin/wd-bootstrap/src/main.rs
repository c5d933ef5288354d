//! Warden Bootstrap
//!
//! Opens the identity store, applies the schema and creates an organization
//! scope with its root user in one transaction. The result is printed as
//! JSON on stdout.
//!
//! ## Usage
//!
//! ```text
//! wd-bootstrap [CONFIG_FILE]
//! ```
//!
//! Without an argument the config file is searched in `WARDEN_CONFIG` and the
//! standard locations; defaults apply when none is found.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WARDEN_CONFIG` | - | Path to a TOML config file |
//! | `WARDEN_DATABASE_URL` | `sqlite://warden.db` | SQLite connection URL |
//! | `WARDEN_DATABASE_MAX_CONNECTIONS` | `5` | Pool size |
//! | `WARDEN_DATABASE_CREATE_SCHEMA` | `true` | Apply the schema on startup |
//! | `WARDEN_BOOTSTRAP_ORGANIZATION_NAME` | `global` | Organization scope name |
//! | `WARDEN_BOOTSTRAP_ROOT_USER_NAME` | `admin` | Root user name |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `RUST_LOG` | `info` | Log level |

use anyhow::{Context, Result};
use tracing::info;

use wd_config::ConfigLoader;
use wd_iam::{BootstrapOrganizationCommand, BootstrapOrganizationUseCase, Store};

#[tokio::main]
async fn main() -> Result<()> {
    wd_common::init_logging("wd-bootstrap")?;

    info!("Starting Warden bootstrap");

    let loader = match std::env::args().nth(1) {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let store = Store::connect(&config.database)
        .await
        .with_context(|| format!("opening identity store at {}", config.database.url))?;

    let command = BootstrapOrganizationCommand::from(&config.bootstrap);
    let result = BootstrapOrganizationUseCase::new(store)
        .execute(command)
        .await
        .context("bootstrapping organization")?;

    info!(
        organization = %result.organization.public_id,
        root_user = %result.root_user.public_id,
        "Bootstrap complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
