//! FreeScout API model types.

mod conversation;
mod customer;
mod knowledge_base;
mod mailbox;
mod thread;
mod ticket;

pub use conversation::*;
pub use customer::{Customer, CustomerCreateParams, CustomerEmail, CustomerEmbedded};
pub use knowledge_base::*;
pub use mailbox::*;
pub use thread::*;
pub use ticket::*;
