//! Mailbox model and trait implementations.

use serde::{Deserialize, Serialize};

use crate::traits::{Get, List, NoQuery};

/// A configured inbox on the FreeScout server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    pub id: u64,
    pub name: String,
    /// Address the mailbox sends from.
    #[serde(default)]
    pub email: Option<String>,
}

impl Get for Mailbox {
    const RESOURCE: &'static str = "mailboxes";
}

impl List for Mailbox {
    type Query = NoQuery;
    const PATH: &'static str = "mailboxes";
    const EMBEDDED: &'static str = "mailboxes";
}
