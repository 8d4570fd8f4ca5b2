//! # Location Provider
//!
//! The router reads and writes the "current location token" through the
//! `Location` trait. Whoever owns the real location (a browser hash, a terminal
//! history stack) implements it and pushes change notifications to
//! subscribers.
//!
//! `HashLocation` is the in-process implementation used by the terminal
//! dashboard: a hash string with browser-style back/forward history.
//!
//! ```text
//! history: ["#home", "#modeling/calculation-setup", "#results/impact-overview"]
//!                                 ▲
//!                               index   (back → "#home", forward → "#results/…")
//! ```

use log::debug;
use std::sync::mpsc::Sender;

/// Handle returned by `Location::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait Location {
    /// The current raw token (e.g. `"#modeling/calculation-setup"`).
    fn token(&self) -> &str;

    /// Replace the current token. Subscribers are notified if it changed.
    fn set_token(&mut self, token: &str);

    /// Register a listener for change notifications.
    fn subscribe(&mut self, listener: Sender<String>) -> SubscriptionId;

    /// Returns false if the id was unknown.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Step back in history, if the provider keeps one. Returns true if the
    /// token changed.
    fn back(&mut self) -> bool {
        false
    }

    /// Step forward in history, if the provider keeps one.
    fn forward(&mut self) -> bool {
        false
    }
}

/// In-memory hash location with back/forward history.
pub struct HashLocation {
    history: Vec<String>,
    index: usize,
    listeners: Vec<(SubscriptionId, Sender<String>)>,
    next_id: u64,
}

impl HashLocation {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![initial.to_string()],
            index: 0,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn notify(&mut self) {
        let token = self.history[self.index].clone();
        debug!("Location changed to {token} ({} listeners)", self.listeners.len());
        // Listeners whose receiver is gone are dropped.
        self.listeners
            .retain(|(_, listener)| listener.send(token.clone()).is_ok());
    }
}

impl Location for HashLocation {
    fn token(&self) -> &str {
        &self.history[self.index]
    }

    fn set_token(&mut self, token: &str) {
        if self.token() == token {
            return;
        }
        self.history.truncate(self.index + 1);
        self.history.push(token.to_string());
        self.index = self.history.len() - 1;
        self.notify();
    }

    fn subscribe(&mut self, listener: Sender<String>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.notify();
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.history.len() {
            return false;
        }
        self.index += 1;
        self.notify();
        true
    }
}
