//! Repository factory trait
//!
//! Lets callers build repositories without naming the backend-specific
//! constructor.

/// A factory for repository instances, generic over the repository type and
/// the configuration it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
