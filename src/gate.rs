use crate::config::WorkflowConfig;
use crate::identity::IdentitySource;
use crate::navigator::Navigator;
use crate::notify::{Notice, Notifier};
use crate::session::SessionSource;
use crate::utils::{lock_connectable_mutex_safely, with_return_url};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const MSG_NEEDS_LOGIN: &str = "Please sign in to continue";
pub const MSG_NEEDS_UPLOAD: &str = "Please upload your business license to start bidding";
pub const MSG_REJECTED: &str =
    "Your verification documents were rejected, please submit new ones";
pub const MSG_PENDING: &str = "Your verification is still being reviewed, please try again later";

/// Outcome of one gate evaluation. Remediation precedence is the variant
/// order: a rejected submission beats a merely unfinished one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Pass,
    NeedsLogin,
    NeedsVerificationUpload,
    VerificationRejected,
    VerificationPending,
}

/// Session first, identity second, short-circuiting: an unauthenticated
/// caller never learns that a verification prompt exists. Nothing is cached
/// between evaluations because verification status can change between page
/// load and the click.
pub async fn check_eligibility(
    session_mutex: &Mutex<impl SessionSource>,
    identity_mutex: &Mutex<impl IdentitySource>,
) -> GateOutcome {
    info!("Checking session");
    let session_status = {
        let mut session = match lock_connectable_mutex_safely(session_mutex).await {
            Ok(session) => session,
            Err(e) => {
                // Fails open to "not logged in".
                warn!("Session source unavailable: {}", e);
                return GateOutcome::NeedsLogin;
            }
        };
        match session.check_session().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Session check failed: {}", e);
                return GateOutcome::NeedsLogin;
            }
        }
    };
    if !session_status.success || !session_status.is_logged_in {
        return GateOutcome::NeedsLogin;
    }

    info!("Checking identity verification");
    let identity_status = {
        let mut identity = match lock_connectable_mutex_safely(identity_mutex).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Identity source unavailable: {}", e);
                return GateOutcome::VerificationPending;
            }
        };
        match identity.check_identity_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!("Identity check failed: {}", e);
                return GateOutcome::VerificationPending;
            }
        }
    };
    if !identity_status.is_upload {
        return GateOutcome::NeedsVerificationUpload;
    }
    if identity_status.is_reject {
        return GateOutcome::VerificationRejected;
    }
    if !identity_status.is_verify {
        return GateOutcome::VerificationPending;
    }

    GateOutcome::Pass
}

/// Evaluates the gate and, on any non-pass outcome, surfaces its notice and
/// performs the remediation navigation with the origin route carried along
/// as `returnUrl`. Pending is the one branch that stays on the current page.
pub async fn enforce_eligibility(
    session_mutex: &Mutex<impl SessionSource>,
    identity_mutex: &Mutex<impl IdentitySource>,
    current_route: &str,
    navigator: &mut impl Navigator,
    notifier: &mut impl Notifier,
    config: &WorkflowConfig,
) -> GateOutcome {
    let outcome = check_eligibility(session_mutex, identity_mutex).await;
    match outcome {
        GateOutcome::Pass => (),
        GateOutcome::NeedsLogin => {
            notifier.notify(Notice::error(MSG_NEEDS_LOGIN));
            let route = with_return_url(&config.sign_in_route, current_route);
            if let Err(e) = navigator.navigate(&route) {
                warn!("Redirect to {} failed: {}", route, e);
            }
        }
        GateOutcome::NeedsVerificationUpload => {
            notifier.notify(Notice::error(MSG_NEEDS_UPLOAD));
            let route = with_return_url(&config.verification_route, current_route);
            if let Err(e) = navigator.navigate(&route) {
                warn!("Redirect to {} failed: {}", route, e);
            }
        }
        GateOutcome::VerificationRejected => {
            notifier.notify(Notice::error(MSG_REJECTED));
            // Leave the notice on screen long enough to be read before the
            // redirect fires.
            tokio::time::sleep(config.rejection_redirect_delay).await;
            let route = with_return_url(&config.verification_route, current_route);
            if let Err(e) = navigator.navigate(&route) {
                warn!("Redirect to {} failed: {}", route, e);
            }
        }
        GateOutcome::VerificationPending => {
            notifier.notify(Notice::info(MSG_PENDING));
        }
    }
    outcome
}
