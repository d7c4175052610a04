use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    /// bcrypt only looks at the first 72 bytes.
    #[validate(length(min = 8, max = 72))]
    pub password: String,
}
