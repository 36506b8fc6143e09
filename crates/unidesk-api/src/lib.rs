// unidesk-api: Async Rust clients for the university records API and the
// Gemini advisory endpoint.

pub mod error;
pub mod genai;
pub mod records;
pub mod transport;

pub use error::Error;
pub use genai::GenAiClient;
pub use records::RecordsClient;
pub use transport::{TlsMode, TransportConfig};
