//! Tenant scope resolution
//!
//! Determines which tenant a request may act on. Global principals may name
//! any tenant (or none, for unscoped reads); every other allowed role gets
//! its tenant from the linked reporter profile and client-supplied tenant
//! parameters are ignored.

use super::store::PublicationStore;
use newsdesk_common::auth::{Principal, Role};
use newsdesk_common::errors::{AppError, Result};
use uuid::Uuid;

/// Resolved tenant context, immutable for the rest of the request
#[derive(Debug, Clone)]
pub struct TenantContext {
    /// None only for a global principal that did not name a tenant
    pub tenant_id: Option<Uuid>,

    /// The reporter profile the scope came from, when applicable
    pub reporter_id: Option<Uuid>,

    pub role: Role,
}

impl TenantContext {
    /// Whether this context may read the given tenant's data
    pub fn can_access(&self, tenant_id: Uuid) -> bool {
        match self.tenant_id {
            Some(own) => own == tenant_id,
            None => true, // global scope
        }
    }
}

/// Resolve the tenant scope for a principal
pub async fn resolve(
    store: &dyn PublicationStore,
    principal: &Principal,
    explicit_tenant_id: Option<Uuid>,
) -> Result<TenantContext> {
    let role = principal.role.ok_or_else(|| AppError::RoleNotAllowed {
        role: principal.role_name.clone(),
    })?;

    if role == Role::SuperAdmin {
        return Ok(TenantContext {
            tenant_id: explicit_tenant_id,
            reporter_id: None,
            role,
        });
    }

    // Tenant-scoped roles: the reporter profile is the only trusted source.
    let reporter = store
        .find_reporter_by_user_id(principal.user_id)
        .await?
        .ok_or(AppError::ProfileNotLinked)?;

    Ok(TenantContext {
        tenant_id: Some(reporter.tenant_id),
        reporter_id: Some(reporter.id),
        role,
    })
}
