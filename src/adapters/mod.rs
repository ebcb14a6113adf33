// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod openai;
pub mod smtp;

pub use openai::OpenAiGenerator;
pub use smtp::SmtpMailer;
