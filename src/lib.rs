pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{OpenAiGenerator, SmtpMailer};
pub use crate::config::{AppConfig, CliConfig};
pub use crate::core::{
    composer::Composer,
    dispatcher::{DeliveryStatus, Dispatcher},
    transformer::Transformer,
    validator::is_allowed_recipient,
};
pub use crate::domain::model::{ComposedMessage, Draft};
pub use crate::utils::error::{ComposerError, Result};
