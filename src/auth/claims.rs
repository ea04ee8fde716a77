use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of an access token issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,                  // user ID
    pub exp: usize,                 // expires at (unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,         // issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,        // issuer
    pub aud: String,                // audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
