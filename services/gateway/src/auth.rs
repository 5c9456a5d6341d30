//! Request authentication extractors
//!
//! Wallet users are identified by the `X-Wallet-Address` header (trusted
//! as-is for now; signature verification belongs to the wallet layer).
//! The admin surface requires an HMAC-signed bearer token whose claims
//! carry `admin: true`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub const WALLET_HEADER: &str = "X-Wallet-Address";

/// An authenticated trading user, address normalized to lower case
pub struct WalletUser {
    pub address: String,
}

/// Lower-case and validate a wallet address: 0x followed by 40 hex digits
pub fn normalize_address(raw: &str) -> Result<String, ApiError> {
    let address = raw.trim().to_ascii_lowercase();
    let hex = address
        .strip_prefix("0x")
        .ok_or_else(|| ApiError::Unauthenticated("invalid wallet address".to_string()))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ApiError::Unauthenticated(
            "invalid wallet address".to_string(),
        ));
    }
    Ok(address)
}

#[async_trait]
impl FromRequestParts<AppState> for WalletUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(WALLET_HEADER)
            .ok_or_else(|| ApiError::Unauthenticated("missing wallet address".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthenticated("invalid wallet address".to_string()))?;

        let address = normalize_address(raw)?;
        Ok(WalletUser { address })
    }
}

#[derive(Debug, Deserialize)]
struct AdminClaims {
    #[serde(default)]
    admin: bool,
    #[allow(dead_code)]
    exp: usize,
}

/// An authenticated administrator
pub struct AdminUser;

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| ApiError::Unauthenticated("missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthenticated("invalid authorization header".to_string()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthenticated("invalid authorization header".to_string())
        })?;

        let key = DecodingKey::from_secret(state.config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AdminClaims>(token, &key, &validation)
            .map_err(|_| ApiError::Unauthenticated("invalid token".to_string()))?;

        if !data.claims.admin {
            return Err(ApiError::Unauthenticated("invalid token".to_string()));
        }

        Ok(AdminUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address_lowercases() {
        let raw = "0x00000000000000000000000000000000000000AA";
        let address = normalize_address(raw).unwrap();
        assert_eq!(address, "0x00000000000000000000000000000000000000aa");
    }

    #[test]
    fn test_normalize_address_rejects_bad_input() {
        assert!(normalize_address("").is_err());
        assert!(normalize_address("not-an-address").is_err());
        // missing 0x prefix
        assert!(normalize_address("0000000000000000000000000000000000000000aa").is_err());
        // too short
        assert!(normalize_address("0x1234").is_err());
        // non-hex characters
        assert!(normalize_address("0x00000000000000000000000000000000000000zz").is_err());
    }
}
