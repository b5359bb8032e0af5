mod client;
mod error;

pub(crate) use client::ClientFactory;
pub use client::{AuthUser, SupabaseClient, Todo};
pub use error::SupabaseError;
