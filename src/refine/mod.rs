pub mod client;
pub mod fallback;

pub use client::RefineClient;
pub use fallback::{refine_all_local, refine_local};

use serde::{Deserialize, Serialize};

/// One refined task as produced by either refinement path: the rewritten
/// display text, an assigned priority, and a past-tense restatement of
/// the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refined {
    pub text: String,
    pub priority: u8,
    pub original: String,
}

/// Error type for the refinement pipeline
#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    #[error("BB2_API_KEY is not set")]
    MissingApiKey,
    #[error("refinement request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("refinement service returned status {status}")]
    Service { status: u16 },
    #[error("could not parse refinement response: {raw}")]
    Parse { raw: String },
    #[error("refinement response had {got} entries for {expected} tasks")]
    LengthMismatch { expected: usize, got: usize },
}
