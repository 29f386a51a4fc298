//! User repository trait defining the interface for account persistence.
//!
//! Accounts are written exactly once, after the email address has been
//! proven with a passcode, so the contract is intentionally small.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use vg_core::repositories::UserRepository;
/// use vg_core::domain::entities::user::User;
/// use vg_core::errors::DomainError;
///
/// struct InMemoryUsers;
///
/// #[async_trait]
/// impl UserRepository for InMemoryUsers {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Account exists
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new account
    ///
    /// Fails with `DuplicateIdentity` when the email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;
}
