pub mod dispatcher;
pub mod formatter;
pub mod resolver;

pub use crate::domain::model::{DispatchOutcome, Order, OrderCreatedEvent, OutboundMessage};
pub use crate::domain::ports::{DirectoryStore, IdentityLookup, MailSender};
pub use crate::utils::error::Result;
