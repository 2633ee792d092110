//! Roles, permissions, and the join entity between them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{PermissionId, RoleId};

/// A named role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Unique role identifier.
    pub id: RoleId,
    /// Display name.
    pub name: String,
}

/// A named permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: PermissionId,
    /// Permission name, e.g. `tickets.archive`.
    pub name: String,
}

/// Grants one permission to one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PermissionAllocation {
    /// Unique allocation identifier.
    pub id: i64,
    /// The role receiving the permission.
    pub role_id: RoleId,
    /// The granted permission.
    pub permission_id: PermissionId,
}
