pub mod github;
pub mod groq;
pub mod http;
