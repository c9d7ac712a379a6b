//! The user is whoever is logged in to the studio. Authentication happens
//! elsewhere; by the time a `User` exists here it has already been verified.
//!
//! A user's ID doubles as the namespace their photos are stored under, and
//! every piece they record is stamped with it.

studio_model! {
    /// The `User` model describes a logged-in member of the studio.
    pub struct User {
        id: <<UserID>>,
        /// The email the user signed in with.
        email: String,
    }
}

impl User {
    /// Create a user from an already-authenticated identity.
    pub fn new<T: Into<String>>(id: UserID, email: T) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
