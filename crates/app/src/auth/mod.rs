//! Authentication

mod errors;
mod hasher;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use hasher::{TokenHasher, TokenHasherError};
pub use models::{ApiTokenMetadata, ApiTokenUuid, IssuedApiToken};
pub use service::*;
pub use token::{
    API_TOKEN_PREFIX, API_TOKEN_SECRET_BYTES, ApiTokenError, ApiTokenSecret, ApiTokenVersion,
    ParsedApiToken, build_verifier_input, format_api_token, generate_api_token_secret,
    parse_api_token,
};
