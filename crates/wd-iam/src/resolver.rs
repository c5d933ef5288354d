//! Ownership Resolver
//!
//! Single-hop lookups shared by every owned or scoped resource. Each lookup
//! runs exactly one query keyed by a foreign id stored on the calling entity
//! and returns the resolved entity or `IamError::NotFound`. There is no
//! transitive walk: resolving an owner's owner is two explicit calls.

use crate::scope::entity::Scope;
use crate::shared::error::{IamError, Result};
use crate::store::{Reader, Resource};
use crate::user::entity::User;

/// A resource administered by another principal.
pub trait Owned {
    /// Owning user id, 0 when unowned.
    fn owner_id(&self) -> u32;
}

/// A resource homed in a scope.
pub trait Scoped {
    fn primary_scope_id(&self) -> u32;
}

/// Resolve the row of type `T` with storage id `id`.
pub async fn lookup<T, R>(reader: &mut R, id: u32) -> Result<T>
where
    T: Resource,
    R: Reader,
{
    if id == 0 {
        return Err(IamError::not_found(T::RESOURCE_TYPE, id));
    }
    reader
        .lookup_by_id::<T>(id)
        .await?
        .ok_or_else(|| IamError::not_found(T::RESOURCE_TYPE, id))
}

/// Resolve the user that owns `entity`. Unowned entities (root users,
/// organization scopes) yield `NotFound`.
pub async fn owner_of<E, R>(entity: &E, reader: &mut R) -> Result<User>
where
    E: Owned + ?Sized,
    R: Reader,
{
    lookup::<User, R>(reader, entity.owner_id()).await
}

/// Resolve the scope `entity` is homed in.
pub async fn primary_scope_of<E, R>(entity: &E, reader: &mut R) -> Result<Scope>
where
    E: Scoped + ?Sized,
    R: Reader,
{
    lookup::<Scope, R>(reader, entity.primary_scope_id()).await
}
