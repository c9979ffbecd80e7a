//! Signals returned by cart mutations.

use std::fmt;

use crate::cart::LineKey;
use serde::Serialize;

/// What a cart mutation did.
///
/// Returned from every mutating [`CartStore`](crate::cart::CartStore) call so
/// the UI can decide how to react (a toast, a badge animation) without the
/// cart knowing about either. `Display` renders the storefront's toast text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new line was appended.
    Added {
        key: LineKey,
        name: String,
        quantity: i64,
    },
    /// Units were added to an existing line.
    Merged {
        key: LineKey,
        name: String,
        added: i64,
        quantity: i64,
    },
    /// A line's quantity was set.
    QuantityUpdated {
        key: LineKey,
        name: String,
        quantity: i64,
    },
    /// A line was removed.
    Removed { key: LineKey, name: String },
    /// The cart was emptied.
    Cleared { lines: usize },
}

impl CartEvent {
    /// Key of the affected line, if the event concerns one line.
    pub fn key(&self) -> Option<&LineKey> {
        match self {
            CartEvent::Added { key, .. }
            | CartEvent::Merged { key, .. }
            | CartEvent::QuantityUpdated { key, .. }
            | CartEvent::Removed { key, .. } => Some(key),
            CartEvent::Cleared { .. } => None,
        }
    }
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::Added { name, quantity, .. } => {
                write!(f, "Agregado: {}× {}", quantity, name)
            }
            CartEvent::Merged {
                name,
                added,
                quantity,
                ..
            } => write!(f, "Agregado: {}× {} (total {})", added, name, quantity),
            CartEvent::QuantityUpdated { name, quantity, .. } => {
                write!(f, "Actualizado: {}× {}", quantity, name)
            }
            CartEvent::Removed { name, .. } => write!(f, "Eliminado: {}", name),
            CartEvent::Cleared { .. } => write!(f, "Carrito vacío"),
        }
    }
}
