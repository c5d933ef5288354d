//! Bootstrap Organization Use Case
//!
//! Creates an organization scope together with its root user. Both rows are
//! written in one unit of work, so a failure on the user leaves no orphan
//! organization behind.

use serde::{Deserialize, Serialize};
use tracing::info;
use wd_config::BootstrapConfig;

use crate::scope::entity::{Scope, ScopeKind, ScopeOptions};
use crate::shared::error::{IamError, Result};
use crate::store::{Store, Writer};
use crate::user::entity::{User, UserOptions};

/// Command for bootstrapping a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapOrganizationCommand {
    /// Organization scope name
    pub organization_name: String,

    /// Root user name
    pub root_user_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&BootstrapConfig> for BootstrapOrganizationCommand {
    fn from(config: &BootstrapConfig) -> Self {
        Self {
            organization_name: config.organization_name.clone(),
            root_user_name: config.root_user_name.clone(),
            description: None,
        }
    }
}

/// The persisted organization and its root user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrappedOrganization {
    pub organization: Scope,
    pub root_user: User,
}

pub struct BootstrapOrganizationUseCase {
    store: Store,
}

impl BootstrapOrganizationUseCase {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn execute(&self, command: BootstrapOrganizationCommand) -> Result<BootstrappedOrganization> {
        let organization_name = command.organization_name.trim();
        if organization_name.is_empty() {
            return Err(IamError::validation(
                "ORGANIZATION_NAME_REQUIRED",
                "Organization name is required",
            ));
        }

        let root_user_name = command.root_user_name.trim();
        if root_user_name.is_empty() {
            return Err(IamError::validation(
                "ROOT_USER_NAME_REQUIRED",
                "Root user name is required",
            ));
        }

        let mut options = ScopeOptions::new().with_name(organization_name);
        if let Some(ref description) = command.description {
            options = options.with_description(description);
        }
        let mut organization = Scope::new(ScopeKind::Organization, options)?;

        let mut uow = self.store.begin().await?;
        uow.create(&mut organization).await?;

        let mut root_user = User::new(
            &organization,
            UserOptions::new().as_root_user(true).with_name(root_user_name),
        )?;
        uow.create(&mut root_user).await?;
        uow.commit().await?;

        info!(
            organization_id = organization.id,
            root_user_id = root_user.id,
            name = organization_name,
            "Bootstrapped organization"
        );

        Ok(BootstrappedOrganization {
            organization,
            root_user,
        })
    }
}

/// Bootstrap an organization named `organization_name` with a root user
/// named `root_user_name`.
pub async fn bootstrap_organization(
    store: &Store,
    organization_name: &str,
    root_user_name: &str,
) -> Result<(Scope, User)> {
    let command = BootstrapOrganizationCommand {
        organization_name: organization_name.to_string(),
        root_user_name: root_user_name.to_string(),
        description: None,
    };
    let result = BootstrapOrganizationUseCase::new(store.clone())
        .execute(command)
        .await?;
    Ok((result.organization, result.root_user))
}
