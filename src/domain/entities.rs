//! Domain entities. Pure data structures for the core business.
//!
//! No wire or database types here — adapters map to and from these.

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Encoded by the password hasher; never the plain password.
    pub pass_hash: String,
    pub is_admin: bool,
}

/// A client application that users log into. Tokens are signed with its secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub id: i32,
    pub name: String,
    pub secret: String,
}
