mod dto;
mod jwt_authorization_validator;
mod role;
pub mod util;

pub use dto::User;
pub use jwt_authorization_validator::*;
pub use role::*;

use crate::error::Error;

///
/// Validates that user has all required roles.
///
/// ### Errors
/// - [Error::MissingRole] when any of the roles is missing
///
pub fn require_all_roles(user: &User, roles: &[Role]) -> Result<(), Error> {
    for role in roles {
        let found_role = user
            .roles
            .iter()
            .any(|user_role| user_role == role.as_ref());
        if !found_role {
            return Err(Error::MissingRole((*role).into()));
        }
    }

    Ok(())
}
