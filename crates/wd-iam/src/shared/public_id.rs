//! Public identifiers
//!
//! Every id-bearing resource carries an opaque, externally visible id
//! alongside its storage-assigned integer id. Format: `<prefix>_<uuid-simple>`.

use uuid::Uuid;

pub const SCOPE_PREFIX: &str = "s";
pub const USER_PREFIX: &str = "u";
pub const GROUP_PREFIX: &str = "g";
pub const AUTH_METHOD_PREFIX: &str = "am";
pub const USER_ALIAS_PREFIX: &str = "ua";

pub fn generate(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
