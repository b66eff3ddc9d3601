use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user store failed: {0}")]
    Store(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct NewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Store boundary for user accounts.
pub trait UserStore: Send + Sync {
    /// Creates an account; fails with [`UserStoreError::EmailTaken`] when the
    /// email is already registered.
    fn create(&self, user: &NewUser) -> Result<User, UserStoreError>;

    /// Verifies credentials and records the login time.
    ///
    /// Fails with [`UserStoreError::InvalidCredentials`] for an unknown email
    /// or a wrong password, without distinguishing the two.
    fn authenticate(&self, email: &str, password: &str) -> Result<User, UserStoreError>;
}
