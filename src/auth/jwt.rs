use axum::extract::FromRef;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::{auth::claims::Claims, config::IdentityConfig, state::AppState};

/// Verification half of the identity provider's HS256 keypair.
#[derive(Clone)]
pub struct IdentityKeys {
    pub decoding: DecodingKey,
    pub issuer: Option<String>,
    pub audience: String,
}

impl FromRef<AppState> for IdentityKeys {
    fn from_ref(state: &AppState) -> Self {
        let IdentityConfig {
            jwt_secret,
            issuer,
            audience,
        } = state.config.identity.clone();
        Self {
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
            issuer,
            audience,
        }
    }
}

impl IdentityKeys {
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&self.audience));
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(std::slice::from_ref(issuer));
        }
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "token verified");
        Ok(data.claims)
    }
}
