pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::mailer::Mailer;
pub use adapters::trigger::TriggerPayload;
pub use app::{build_dispatcher, handle_payload, InvocationResponse, LiveDispatcher};
pub use config::ReceiptConfig;
pub use crate::core::{dispatcher::ReceiptDispatcher, formatter::ReceiptTemplate};
pub use domain::model::{DispatchOutcome, LineItem, Order, OrderCreatedEvent, RecipientEmail};
pub use utils::error::{ReceiptError, Result};
