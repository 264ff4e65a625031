// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::model::{Role, UserId};
use ed25519_dalek::{
    SigningKey, VerifyingKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use rusty_paseto::core::{
    Footer, Key, Paseto, PasetoAsymmetricPrivateKey, PasetoAsymmetricPublicKey, Payload, Public,
    V4,
};
use serde_json::json;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub const TERRARIUM_SESSION_TOKEN_FOOTER: &str = "key-id:terrarium_session";

/// PASETO public token for an authenticated account, encoding the account's
/// identity, role and expiry.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AuthToken(pub String);

/// What a valid session token asserts about its bearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Could not parse PEM-encoded key")]
    KeyParseError,
    #[error("Incorrect key format for key: {0}")]
    IncorrectKeyFormat(String),
    #[error("Could not read key from file: {0}")]
    ReadError(std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid auth token")]
    InvalidToken,
    #[error("Auth token expired")]
    Expired,
}

/// Parse a public and private key from the given PEM strings.
pub fn parse_keypair(public_key: &str, private_key: &str) -> Result<(Key<64>, Key<32>), KeyError> {
    let private_key =
        SigningKey::from_pkcs8_pem(private_key).map_err(|_| KeyError::KeyParseError)?;
    let public_key =
        VerifyingKey::from_public_key_pem(public_key).map_err(|_| KeyError::KeyParseError)?;

    let priv_key: Key<64> = Key::from(private_key.to_keypair_bytes());
    let pub_key: Key<32> = Key::from(public_key.to_bytes());
    Ok((priv_key, pub_key))
}

/// Load a keypair from the given public and private key (PEM) files.
pub fn load_keypair(public_key: &Path, private_key: &Path) -> Result<(Key<64>, Key<32>), KeyError> {
    let (Some(pubkey_pem), Some(privkey_pem)) = (
        std::fs::read_to_string(public_key).ok(),
        std::fs::read_to_string(private_key).ok(),
    ) else {
        return Err(KeyError::ReadError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not read key from file",
        )));
    };

    parse_keypair(&pubkey_pem, &privkey_pem)
}

/// Signs and validates session tokens with one ed25519 keypair. Constructed
/// once at startup and shared by every request handler.
pub struct TokenAuthority {
    private_key: Key<64>,
    public_key: Key<32>,
    token_ttl: Duration,
}

impl TokenAuthority {
    pub fn new(private_key: Key<64>, public_key: Key<32>, token_ttl: Duration) -> Self {
        Self {
            private_key,
            public_key,
            token_ttl,
        }
    }

    /// Construct a PASETO token for this login. The token carries the account
    /// id, its role, and an expiry timestamp.
    pub fn make_auth_token(&self, user_id: UserId, role: Role) -> AuthToken {
        let privkey: PasetoAsymmetricPrivateKey<V4, Public> =
            PasetoAsymmetricPrivateKey::from(self.private_key.as_ref());
        let expires = unix_now() + self.token_ttl.as_secs();
        let token = Paseto::<V4, Public>::default()
            .set_footer(Footer::from(TERRARIUM_SESSION_TOKEN_FOOTER))
            .set_payload(Payload::from(
                json!({
                    "sub": user_id.to_string(),
                    "role": role,
                    "exp": expires,
                    "iss": "terrarium",
                })
                .to_string()
                .as_str(),
            ))
            .try_sign(&privkey)
            .expect("Unable to build Paseto token");

        AuthToken(token)
    }

    /// Validate the provided PASETO token and extract the session claims.
    pub fn validate_auth_token(&self, token: &AuthToken) -> Result<SessionClaims, AuthError> {
        let pk: PasetoAsymmetricPublicKey<V4, Public> =
            PasetoAsymmetricPublicKey::from(&self.public_key);
        let verified_token = Paseto::<V4, Public>::try_verify(
            token.0.as_str(),
            &pk,
            Footer::from(TERRARIUM_SESSION_TOKEN_FOOTER),
            None,
        )
        .map_err(|e| {
            warn!(error = ?e, "Unable to parse/validate token");
            AuthError::InvalidToken
        })?;

        let claims = serde_json::from_str::<serde_json::Value>(verified_token.as_str())
            .map_err(|e| {
                warn!(error = ?e, "Unable to parse token claims");
                AuthError::InvalidToken
            })?;

        let Some(sub) = claims.get("sub").and_then(|v| v.as_str()) else {
            debug!("Token does not contain sub");
            return Err(AuthError::InvalidToken);
        };
        let Ok(user_id) = Uuid::parse_str(sub) else {
            debug!("Token sub is not a valid UUID");
            return Err(AuthError::InvalidToken);
        };

        let Some(role) = claims.get("role") else {
            debug!("Token does not contain role");
            return Err(AuthError::InvalidToken);
        };
        let Ok(role) = serde_json::from_value::<Role>(role.clone()) else {
            debug!("Token role is not valid");
            return Err(AuthError::InvalidToken);
        };

        let Some(expires) = claims.get("exp").and_then(|v| v.as_u64()) else {
            debug!("Token does not contain exp");
            return Err(AuthError::InvalidToken);
        };
        if unix_now() >= expires {
            return Err(AuthError::Expired);
        }

        Ok(SessionClaims {
            user_id: UserId(user_id),
            role,
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn test_authority(seed: u8, ttl: Duration) -> TokenAuthority {
        let signing = SigningKey::from_bytes(&[seed; 32]);
        let private_key: Key<64> = Key::from(signing.to_keypair_bytes());
        let public_key: Key<32> = Key::from(signing.verifying_key().to_bytes());
        TokenAuthority::new(private_key, public_key, ttl)
    }

    #[test]
    fn test_token_roundtrip() {
        let authority = test_authority(7, Duration::from_secs(3600));
        let user_id = UserId::new();
        let token = authority.make_auth_token(user_id, Role::Admin);
        let claims = authority.validate_auth_token(&token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let authority = test_authority(7, Duration::from_secs(3600));
        let result = authority.validate_auth_token(&AuthToken("v4.public.nonsense".to_string()));
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signer = test_authority(7, Duration::from_secs(3600));
        let verifier = test_authority(8, Duration::from_secs(3600));
        let token = signer.make_auth_token(UserId::new(), Role::User);
        assert_eq!(
            verifier.validate_auth_token(&token),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let authority = test_authority(7, Duration::ZERO);
        let token = authority.make_auth_token(UserId::new(), Role::User);
        assert_eq!(
            authority.validate_auth_token(&token),
            Err(AuthError::Expired)
        );
    }
}
