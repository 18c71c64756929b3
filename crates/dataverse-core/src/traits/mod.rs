//! Traits for the collaborators the client is built on.

mod credential;
mod tabular;
mod transport;

pub use credential::{StaticTokenCredential, TokenCredential};
pub use tabular::TabularSource;
pub use transport::{Body, HttpRequest, HttpResponse, Method, Transport};
