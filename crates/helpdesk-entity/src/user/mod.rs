//! User, role, permission, and preference entities.

pub mod model;
pub mod preference;
pub mod role;

pub use model::User;
pub use preference::UserPreference;
pub use role::{Permission, PermissionAllocation, Role};
