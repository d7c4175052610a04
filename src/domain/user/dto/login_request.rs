use serde::Deserialize;

/// OAuth2 password-flow form. `username` carries the email; other form
/// fields (`grant_type`, `scope`) are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
