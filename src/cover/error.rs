//! Cover lookup error types

use thiserror::Error;

/// Why a cover lookup produced no answer
#[derive(Debug, Error)]
pub enum CoverError {
    /// Transport, timeout or body decoding failure
    #[error("cover request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status other than "not found"
    #[error("cover service returned HTTP {status}")]
    Status { status: u16 },
}
