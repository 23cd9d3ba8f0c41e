use mockall::automock;
use std::collections::HashMap;

/// Slot key the checkout screen reads the listing id from.
pub const CHECKOUT_LISTING_KEY: &str = "checkout_listing";

/// Short-lived local key-value handoff between the buy-now click and the
/// checkout screen. A value lives until it is read once.
#[automock]
pub trait HandoffSlot {
    fn put(&mut self, key: &str, value: &str);
    fn take(&mut self, key: &str) -> Option<String>;
}

pub struct MemoryHandoff {
    slots: HashMap<String, String>,
}

impl MemoryHandoff {
    pub fn new() -> MemoryHandoff {
        MemoryHandoff {
            slots: HashMap::new(),
        }
    }
}

impl Default for MemoryHandoff {
    fn default() -> MemoryHandoff {
        MemoryHandoff::new()
    }
}

impl HandoffSlot for MemoryHandoff {
    fn put(&mut self, key: &str, value: &str) {
        self.slots.insert(key.to_string(), value.to_string());
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.slots.remove(key)
    }
}
