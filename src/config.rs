use std::time::Duration;

/// Fixed workflow constants, kept configurable rather than inlined at the
/// call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowConfig {
    /// Amount added on top of the leading bid by the quick-increment button.
    pub quick_increment: u64,
    /// How long a rejected-verification notice stays on screen before the
    /// redirect to the upload page fires.
    pub rejection_redirect_delay: Duration,
    pub sign_in_route: String,
    pub verification_route: String,
}

impl Default for WorkflowConfig {
    fn default() -> WorkflowConfig {
        WorkflowConfig {
            quick_increment: 100,
            rejection_redirect_delay: Duration::from_secs(2),
            sign_in_route: "/signin".to_string(),
            verification_route: "/account/verification".to_string(),
        }
    }
}
