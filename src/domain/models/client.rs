use serde::{Deserialize, Serialize};
use std::fmt;

/// A client that tasks are billed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub color: ClientColor,
}

/// Accent color used when rendering a client's badge and avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientColor {
    Blue,
    Purple,
    Pink,
    Teal,
    Orange,
}

impl fmt::Display for ClientColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClientColor::Blue => "blue",
            ClientColor::Purple => "purple",
            ClientColor::Pink => "pink",
            ClientColor::Teal => "teal",
            ClientColor::Orange => "orange",
        };
        write!(f, "{}", name)
    }
}

/// Fields supplied when creating a client; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub color: ClientColor,
}

/// Partial update applied to an existing client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub color: Option<ClientColor>,
}

impl ClientPatch {
    pub(crate) fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(color) = self.color {
            client.color = color;
        }
    }
}
