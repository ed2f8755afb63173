use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Issues and decodes the bearer tokens handed out at login. Tokens carry
/// the surveyor id and expire 12 hours after issuance (configurable); there
/// is no refresh flow and no revocation list.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    pub fn create_jwt(&self, surveyor_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: surveyor_id.to_string(),
            iat: now.timestamp() as usize,
            exp,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        // No leeway: a token is rejected the moment its 12 hours are up.
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

impl super::TokenService for JwtService {
    fn create_jwt(&self, surveyor_id: &str) -> Result<String, AuthError> {
        self.create_jwt(surveyor_id)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        self.decode_jwt(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn config_with_expiry(hours: i64) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_123".into(),
            jwt_expiration_hours: hours,
            cloudinary_cloud_name: "demo".into(),
            cloudinary_api_key: "key".into(),
            cloudinary_api_secret: "secret".into(),
            capture_folder: "road-damage".into(),
            profile_folder: "profile-photos".into(),
        }
    }

    #[test]
    fn token_decodes_back_to_the_same_surveyor_id() {
        let service = JwtService::new(&config_with_expiry(12));

        let token = service.create_jwt("SVR-001").unwrap();
        let decoded = service.decode_jwt(&token).unwrap();

        assert_eq!(decoded.claims.sub, "SVR-001");
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 12 * 60 * 60);
    }

    #[test]
    fn token_is_rejected_once_its_lifetime_has_passed() {
        // A negative expiry stands in for a clock moved 13 hours forward.
        let service = JwtService::new(&config_with_expiry(-13));

        let token = service.create_jwt("SVR-001").unwrap();

        assert!(matches!(
            service.decode_jwt(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = JwtService::new(&config_with_expiry(12));
        let token = service.create_jwt("SVR-001").unwrap();

        let mut tampered = token.clone();
        tampered.push('x');

        assert!(matches!(
            service.decode_jwt(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }
}
