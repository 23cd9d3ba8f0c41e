/// Free-text bid field state. Normalization keeps the text digit-only, the
/// validation rule is strictly-greater-than the leading bid, and a standing
/// error stays attached to the field until cleared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BidInput {
    value: Option<u64>,
    error: Option<String>,
}

impl BidInput {
    pub fn new() -> BidInput {
        BidInput::default()
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Applies raw keyboard input. Blank input is the valid "unset" state;
    /// anything containing a non-digit is dropped without touching the
    /// current state; otherwise the digits are coerced, losing leading zeros.
    pub fn set(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.value = None;
            return;
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return;
        }
        match trimmed.parse::<u64>() {
            Ok(value) => self.value = Some(value),
            Err(_) => (),
        }
    }

    /// Quick-increment: one step above the standing value, or above the
    /// leading bid when unset. The result strictly exceeds the leading bid,
    /// so any standing error is cleared.
    pub fn bump(&mut self, current_bid: u64, increment: u64) {
        self.value = Some(self.value.unwrap_or(current_bid).saturating_add(increment));
        self.error = None;
    }

    /// Enforces the monotonic invariant. An unset field falls back to the
    /// leading bid itself, which always fails, so an empty field can never
    /// submit. The error message carries the numeric floor.
    pub fn validate(&mut self, current_bid: u64) -> Result<u64, String> {
        let amount = self.value.unwrap_or(current_bid);
        if amount <= current_bid {
            let message = format!(
                "Your bid must be higher than the current bid of {}",
                current_bid
            );
            self.error = Some(message.clone());
            return Err(message);
        }
        self.error = None;
        Ok(amount)
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.error = None;
    }

    /// UI guard only; the submitter revalidates and the server decides.
    pub fn submit_disabled(&self, in_flight: bool) -> bool {
        self.error.is_some() || in_flight
    }
}
