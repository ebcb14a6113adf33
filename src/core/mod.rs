pub mod composer;
pub mod dispatcher;
pub mod transformer;
pub mod validator;

pub use crate::domain::model::{ComposedMessage, Draft, Envelope};
pub use crate::domain::ports::{ConfigProvider, Generator, MailTransport};
pub use crate::utils::error::Result;
