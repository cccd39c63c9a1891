//! API token formatting, parsing, and HMAC input construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// API token identifier prefix.
pub const API_TOKEN_PREFIX: &str = "bz";

/// Number of secret bytes encoded in a token.
pub const API_TOKEN_SECRET_BYTES: usize = 32;

const API_TOKEN_SECRET_HEX_CHARS: usize = API_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl From<ApiTokenVersion> for i16 {
    fn from(value: ApiTokenVersion) -> Self {
        value.as_i16()
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct ApiTokenSecret {
    bytes: [u8; API_TOKEN_SECRET_BYTES],
}

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; API_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedApiToken {
    pub token_uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_api_token_secret() -> ApiTokenSecret {
    let mut secret = [0_u8; API_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    ApiTokenSecret::from_bytes(secret)
}

/// Render a token as `bz_v1_<uuid>.<secret hex>`.
#[must_use]
pub fn format_api_token(
    token_uuid: Uuid,
    version: ApiTokenVersion,
    secret: &ApiTokenSecret,
) -> String {
    format!(
        "{API_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a raw bearer token into its identifier, version, and secret.
///
/// # Errors
///
/// Returns an error when the prefix, version, uuid, or secret is malformed.
pub fn parse_api_token(token: &str) -> Result<ParsedApiToken, ApiTokenError> {
    let (prefix_and_id, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(ApiTokenError::InvalidFormat)?;

    if prefix != API_TOKEN_PREFIX {
        return Err(ApiTokenError::InvalidFormat);
    }

    let version = ApiTokenVersion::from_str(version_segment)?;

    let token_uuid = Uuid::try_parse(token_uuid_segment).or(Err(ApiTokenError::InvalidFormat))?;

    if secret_hex.len() != API_TOKEN_SECRET_HEX_CHARS {
        return Err(ApiTokenError::InvalidSecretEncoding);
    }

    let secret: [u8; API_TOKEN_SECRET_BYTES] = decode_hex(secret_hex)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(ApiTokenError::InvalidSecretEncoding)?;

    Ok(ParsedApiToken {
        token_uuid,
        version,
        secret: ApiTokenSecret::from_bytes(secret),
    })
}

/// Build the canonical HMAC input bytes for a token.
///
/// Format: `{token_uuid_hex}:{version_i16_decimal}:{user_uuid_hex}:{secret_hex}`
#[must_use]
pub fn build_verifier_input(
    token_uuid: &Uuid,
    version: ApiTokenVersion,
    user_uuid: &UserUuid,
    secret: &ApiTokenSecret,
) -> Vec<u8> {
    let input = format!(
        "{}:{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes()),
    );

    input.into_bytes()
}

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            encoded.extend(char::from_digit(u32::from(nibble), 16));
        }
    }

    encoded
}

pub(crate) fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    let digits = hex.as_bytes();

    if digits.len() % 2 != 0 {
        return None;
    }

    digits
        .chunks_exact(2)
        .map(|pair| match pair {
            [hi, lo] => Some((decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?),
            _ => None,
        })
        .collect()
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_token_parses_back() {
        let token_uuid = Uuid::now_v7();
        let secret = ApiTokenSecret::from_bytes([0xAB; API_TOKEN_SECRET_BYTES]);
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        assert!(token.starts_with("bz_v1_"), "unexpected token: {token}");

        let parsed = parse_api_token(&token).expect("token should parse");

        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let token = format!("lt_v1_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(
            parse_api_token(&token).map(|parsed| parsed.token_uuid),
            Err(ApiTokenError::InvalidFormat)
        );
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("bz_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert_eq!(
            parse_api_token(&token).map(|parsed| parsed.token_uuid),
            Err(ApiTokenError::UnsupportedVersion)
        );
    }

    #[test]
    fn parse_rejects_bad_secret() {
        let short = format!("bz_v1_{}.abcd", Uuid::nil().simple());
        let not_hex = format!("bz_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        for token in [short, not_hex] {
            assert_eq!(
                parse_api_token(&token).map(|parsed| parsed.token_uuid),
                Err(ApiTokenError::InvalidSecretEncoding),
                "{token}"
            );
        }
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert_eq!(
            parse_api_token("bz_v1_nothing").map(|parsed| parsed.token_uuid),
            Err(ApiTokenError::InvalidFormat)
        );
    }

    #[test]
    fn verifier_input_binds_the_user() {
        let token_uuid = Uuid::nil();
        let secret = ApiTokenSecret::from_bytes([0xCD; API_TOKEN_SECRET_BYTES]);
        let user = UserUuid::new();

        let input1 = build_verifier_input(&token_uuid, ApiTokenVersion::V1, &user, &secret);
        let input2 = build_verifier_input(&token_uuid, ApiTokenVersion::V1, &user, &secret);
        let other = build_verifier_input(
            &token_uuid,
            ApiTokenVersion::V1,
            &UserUuid::new(),
            &secret,
        );

        assert_eq!(input1, input2, "verifier input must be deterministic");
        assert_ne!(input1, other, "verifier input must depend on the user");
    }

    #[test]
    fn hex_helpers_agree() {
        let bytes = [0x00, 0x7f, 0xff, 0x10];

        assert_eq!(encode_hex(&bytes), "007fff10");
        assert_eq!(decode_hex("007FFF10"), Some(bytes.to_vec()));
        assert_eq!(decode_hex("abc"), None);
    }
}
