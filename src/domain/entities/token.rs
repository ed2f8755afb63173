use serde::{Deserialize, Serialize};

use super::surveyor::Surveyor;

/// Bearer-token claims. `sub` carries the surveyor's business id, not the
/// row UUID, so a decoded token identifies the login credential directly.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub fullname: String,
    pub email: String,
    pub surveyor_id: String,
    pub profile_photo_url: String,
}

impl LoginResponse {
    pub fn new(token: String, surveyor: &Surveyor) -> Self {
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            fullname: surveyor.fullname.clone(),
            email: surveyor.email.clone(),
            surveyor_id: surveyor.surveyor_id.clone(),
            profile_photo_url: surveyor.profile_photo_url.clone().unwrap_or_default(),
        }
    }
}
