//! Patient share link service
//!
//! A share link carries the complete raw assessment snapshot inside the
//! URL itself: JSON, gzip-compressed, base64url-encoded. The patient
//! view decodes the token and recomputes every metric from the raw
//! inputs, so a link can never show values that diverge from what the
//! engine produces — there is no trusted cached result to go stale.

use crate::config::ShareConfig;
use crate::error::ApiError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bodymetrics_shared::models::AssessmentInput;
use bodymetrics_shared::types::{ShareLinkResponse, SharedAssessmentResponse};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use thiserror::Error;

/// Share token decode failure
///
/// All variants collapse to a 400: a bad token is a client problem,
/// never a server fault.
#[derive(Error, Debug)]
pub enum ShareTokenError {
    #[error("token is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is corrupted")]
    Compression(#[from] std::io::Error),

    #[error("token does not contain a valid assessment")]
    Payload(#[from] serde_json::Error),
}

impl From<ShareTokenError> for ApiError {
    fn from(err: ShareTokenError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Share link service
pub struct ShareService;

impl ShareService {
    /// Encode raw assessment inputs into a URL-safe token
    pub fn encode_token(input: &AssessmentInput) -> Result<String, ApiError> {
        let json = serde_json::to_vec(input).map_err(|e| ApiError::Internal(e.into()))?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&json)
            .map_err(|e| ApiError::Internal(e.into()))?;
        let compressed = encoder.finish().map_err(|e| ApiError::Internal(e.into()))?;

        Ok(URL_SAFE_NO_PAD.encode(compressed))
    }

    /// Decode a token back into the raw assessment inputs
    pub fn decode_token(token: &str) -> Result<AssessmentInput, ShareTokenError> {
        let compressed = URL_SAFE_NO_PAD.decode(token)?;

        let mut json = Vec::new();
        GzDecoder::new(compressed.as_slice()).read_to_end(&mut json)?;

        Ok(serde_json::from_slice(&json)?)
    }

    /// Build a share link for an assessment
    pub fn create_link(
        config: &ShareConfig,
        input: &AssessmentInput,
    ) -> Result<ShareLinkResponse, ApiError> {
        let token = Self::encode_token(input)?;
        let url = format!("{}/r/{}", config.base_url.trim_end_matches('/'), token);
        Ok(ShareLinkResponse { token, url })
    }

    /// Decode a token and recompute the full result set
    pub fn view(token: &str) -> Result<SharedAssessmentResponse, ApiError> {
        let input = Self::decode_token(token)?;
        let results = input.evaluate();
        Ok(SharedAssessmentResponse { input, results })
    }
}
