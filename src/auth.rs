//! Verifies bearer tokens at the request boundary.
//!
//! This service does not issue tokens: they are minted by the identity
//! service that manages user accounts, signed with the shared secret. All we
//! do here is decode the token and hand the handler a typed [UserId].
//!
//! The extractor is adapted from
//! <https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs>.

use axum::{
    Json, RequestPartsExt,
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::{Response, StatusCode, request::Parts},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use crate::{UserId, state::AuthState};

/// The contents of a JSON Web Token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user.
    pub sub: i64,
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
}

/// The user a request is authenticated as.
///
/// Handlers take this extractor to get the one canonical [UserId] that every
/// store call is scoped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::MissingToken)?;

        let auth_state = AuthState::from_ref(state);
        let token_data = decode_token(bearer.token(), &auth_state.decoding_key)?;

        Ok(AuthenticatedUser(UserId::new(token_data.claims.sub)))
    }
}

/// The errors that may occur while authenticating a request.
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// The request carried no bearer token.
    MissingToken,
    /// The bearer token could not be decoded or has expired.
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response<Body> {
        let message = match self {
            AuthError::MissingToken => "Missing bearer token",
            AuthError::InvalidToken => "Invalid bearer token",
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

/// How long a token minted by [encode_token] stays valid.
const TOKEN_DURATION: Duration = Duration::minutes(15);

/// Create a signed token for `user_id`.
///
/// The server only verifies tokens; this function exists for operational
/// tooling and tests that need a valid token without the identity service.
pub fn encode_token(user_id: UserId, encoding_key: &EncodingKey) -> String {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: user_id.as_i64(),
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key).expect("could not encode JWT")
}

fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, AuthError> {
    decode(token, decoding_key, &Validation::default()).map_err(|_| AuthError::InvalidToken)
}
