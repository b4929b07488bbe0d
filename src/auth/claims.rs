use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub sub: Uuid,     // user ID
    pub email: String, // login email at issuance
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}

impl TokenClaims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
