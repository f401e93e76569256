//! Controller Events
//!
//! Events flow from the controller to any number of UI listeners.

use serde::{Deserialize, Serialize};

/// Notifications raised by an `EqualizerController`
///
/// Only preset loads are announced; band, preamp and enable edits are not.
/// Listeners re-query the controller for the new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EqualizerEvent {
    /// A preset was loaded and committed
    PresetLoaded,
}
