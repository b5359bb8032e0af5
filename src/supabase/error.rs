use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Backend could not resolve a user from the token")]
    Unauthorized,

    #[error("Backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),
}
