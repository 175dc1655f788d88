//! View layer session
//!
//! This module defines the trait for tunneling messages from the quiz engine
//! to whatever renders it. The engine never draws anything itself; it hands
//! every change to a tunnel, which might post it to JavaScript, drive a
//! component tree, or print it in a terminal.

use crate::quiz::{SyncMessage, UpdateMessage};

/// Trait for sending messages through a communication tunnel
pub trait Tunnel {
    /// Sends an update message to the view
    ///
    /// Update messages describe a single change, such as a new question or
    /// a clock tick, and assume the view already shows the previous state.
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends a full state snapshot to the view
    ///
    /// Used when the view is (re)mounted and has to rebuild itself from
    /// scratch.
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);

    /// Closes the tunnel once the view goes away
    fn close(self);
}
