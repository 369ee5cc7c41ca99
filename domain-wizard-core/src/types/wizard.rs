//! Wizard session state machine.
//!
//! The session is an ephemeral value: created when the wizard opens, mutated
//! only by its own transition methods, discarded on close. It is fully
//! serializable so a front-end may checkpoint it, but nothing here persists
//! it. All transitions are pure; network side effects live in
//! [`WizardService`](crate::services::WizardService).

use domain_wizard_verifier::{CheckStatus, DnsCheckKind, RecordCheck};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Wizard steps in fixed order. Transitions move one position forward or
/// backward; there is no branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Enter the domain name and create the registry row.
    Domain,
    /// Verify the MX record (gating).
    Mx,
    /// Verify the SPF record (recommended).
    Spf,
    /// Verify the DKIM record (recommended).
    Dkim,
    /// Verify the DMARC record (recommended).
    Dmarc,
    /// Review check results and activate the domain.
    Review,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; 6] = [
        Self::Domain,
        Self::Mx,
        Self::Spf,
        Self::Dkim,
        Self::Dmarc,
        Self::Review,
    ];

    /// Stable identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Mx => "mx",
            Self::Spf => "spf",
            Self::Dkim => "dkim",
            Self::Dmarc => "dmarc",
            Self::Review => "review",
        }
    }

    /// Title shown in the step header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Domain => "Domain Name",
            Self::Mx => "MX Record",
            Self::Spf => "SPF Record",
            Self::Dkim => "DKIM Record",
            Self::Dmarc => "DMARC Record",
            Self::Review => "Review & Activate",
        }
    }

    /// Whether the step gates forward progress. Among the check steps only
    /// MX is required; SPF/DKIM/DMARC are recommended but skippable.
    #[must_use]
    pub fn required(self) -> bool {
        matches!(self, Self::Domain | Self::Mx | Self::Review)
    }

    /// The DNS check this step verifies, if it is a check step.
    #[must_use]
    pub fn check_kind(self) -> Option<DnsCheckKind> {
        match self {
            Self::Mx => Some(DnsCheckKind::Mx),
            Self::Spf => Some(DnsCheckKind::Spf),
            Self::Dkim => Some(DnsCheckKind::Dkim),
            Self::Dmarc => Some(DnsCheckKind::Dmarc),
            Self::Domain | Self::Review => None,
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Domain => 0,
            Self::Mx => 1,
            Self::Spf => 2,
            Self::Dkim => 3,
            Self::Dmarc => 4,
            Self::Review => 5,
        }
    }

    /// Following step, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Preceding step, if any.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Outcome of one DNS check as seen by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    /// The administrator has acted on this step (verified or skipped).
    pub checked: bool,
    /// The last verification passed.
    pub passed: bool,
    /// Message from the verifier, or `"Skipped"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-check statuses, one slot per [`DnsCheckKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStatuses {
    /// MX check status.
    pub mx: StepStatus,
    /// SPF check status.
    pub spf: StepStatus,
    /// DKIM check status.
    pub dkim: StepStatus,
    /// DMARC check status.
    pub dmarc: StepStatus,
}

impl CheckStatuses {
    /// Status slot for a check.
    #[must_use]
    pub fn get(&self, kind: DnsCheckKind) -> &StepStatus {
        match kind {
            DnsCheckKind::Mx => &self.mx,
            DnsCheckKind::Spf => &self.spf,
            DnsCheckKind::Dkim => &self.dkim,
            DnsCheckKind::Dmarc => &self.dmarc,
        }
    }

    fn get_mut(&mut self, kind: DnsCheckKind) -> &mut StepStatus {
        match kind {
            DnsCheckKind::Mx => &mut self.mx,
            DnsCheckKind::Spf => &mut self.spf,
            DnsCheckKind::Dkim => &mut self.dkim,
            DnsCheckKind::Dmarc => &mut self.dmarc,
        }
    }
}

/// State of one remote action (domain creation, activation).
///
/// A second submit while `InFlight` is rejected by the state machine, so the
/// illegal state is unrepresentable rather than merely disabled in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "camelCase")]
pub enum ActionState {
    /// No request has been issued.
    #[default]
    Idle,
    /// A request is outstanding.
    InFlight,
    /// The last request succeeded.
    Succeeded,
    /// The last request failed; retrying is allowed.
    Failed(String),
}

impl ActionState {
    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// Ephemeral wizard session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSession {
    /// Current step.
    #[serde(default = "WizardSession::initial_step")]
    pub step: WizardStep,
    /// Normalized bare domain name, set once the domain row is created.
    pub domain_name: String,
    /// Premium-only flag attached at creation time.
    pub is_premium_only: bool,
    /// Registry row ID, set once the domain row is created.
    pub domain_id: Option<String>,
    /// Per-check statuses.
    pub checks: CheckStatuses,
    /// State of the create-domain request.
    pub create_state: ActionState,
    /// State of the activate request.
    pub activate_state: ActionState,
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Domain
    }
}

impl WizardSession {
    fn initial_step() -> WizardStep {
        WizardStep::Domain
    }

    /// Fresh session at the first step with everything unchecked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to defaults. Called on modal close and after activation; there
    /// is no resume capability.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Progress percentage for the indicator bar.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn progress_percent(&self) -> u8 {
        (((self.step.index() + 1) * 100) / WizardStep::ALL.len()) as u8
    }

    /// Back is available on all steps except the first and last.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.step != WizardStep::Domain && self.step != WizardStep::Review
    }

    /// Move one step back.
    pub fn go_back(&mut self) -> CoreResult<()> {
        if !self.can_go_back() {
            return Err(self.invalid("back"));
        }
        // can_go_back excludes the first step, so prev always exists here
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        Ok(())
    }

    /// Whether Continue is currently offered: the check passed, or the step
    /// is not required. Never true on `domain` (creation advances it) or
    /// `review` (activation ends the wizard).
    #[must_use]
    pub fn can_continue(&self) -> bool {
        match self.step.check_kind() {
            Some(kind) => self.checks.get(kind).passed || !self.step.required(),
            None => false,
        }
    }

    /// Move one step forward from a check step.
    pub fn try_continue(&mut self) -> CoreResult<()> {
        if !self.can_continue() {
            return Err(self.invalid("continue"));
        }
        self.advance()
    }

    /// Skip the current check step.
    ///
    /// On a required step this is only a "go next after you verified" — it
    /// is rejected unless the check already passed. On an optional step it
    /// marks the check as skipped and advances unconditionally.
    pub fn skip(&mut self) -> CoreResult<()> {
        let Some(kind) = self.step.check_kind() else {
            return Err(self.invalid("skip"));
        };

        if self.step.required() {
            if !self.checks.get(kind).passed {
                return Err(self.invalid("skip"));
            }
            return self.advance();
        }

        *self.checks.get_mut(kind) = StepStatus {
            checked: true,
            passed: false,
            message: Some("Skipped".to_string()),
        };
        self.advance()
    }

    /// Record a verification result for the current step. Does not advance.
    pub fn apply_check(&mut self, kind: DnsCheckKind, check: &RecordCheck) {
        *self.checks.get_mut(kind) = StepStatus {
            checked: true,
            passed: check.status == CheckStatus::Pass,
            message: Some(check.message.clone()),
        };
    }

    /// Whether the review step should warn that mail cannot be received.
    /// A soft warning only; activation is never blocked on it.
    #[must_use]
    pub fn mx_warning(&self) -> bool {
        !self.checks.mx.passed
    }

    pub(crate) fn advance(&mut self) -> CoreResult<()> {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(())
            }
            None => Err(self.invalid("continue")),
        }
    }

    pub(crate) fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            step: self.step.id().to_string(),
            action: action.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pass_check() -> RecordCheck {
        RecordCheck {
            status: CheckStatus::Pass,
            message: "ok".to_string(),
            found: Vec::new(),
        }
    }

    fn fail_check() -> RecordCheck {
        RecordCheck {
            status: CheckStatus::Fail,
            message: "missing".to_string(),
            found: Vec::new(),
        }
    }

    #[test]
    fn initial_session_defaults() {
        let session = WizardSession::new();
        assert_eq!(session.step, WizardStep::Domain);
        assert!(session.domain_id.is_none());
        for kind in DnsCheckKind::ALL {
            let status = session.checks.get(kind);
            assert!(!status.checked);
            assert!(!status.passed);
        }
        assert_eq!(session.create_state, ActionState::Idle);
    }

    #[test]
    fn step_order_is_fixed() {
        let mut step = WizardStep::Domain;
        let mut seen = vec![step];
        while let Some(next) = step.next() {
            seen.push(next);
            step = next;
        }
        assert_eq!(seen, WizardStep::ALL);
        assert_eq!(step, WizardStep::Review);
    }

    #[test]
    fn only_mx_is_required_among_checks() {
        assert!(WizardStep::Mx.required());
        assert!(!WizardStep::Spf.required());
        assert!(!WizardStep::Dkim.required());
        assert!(!WizardStep::Dmarc.required());
    }

    #[test]
    fn required_step_rejects_skip_until_passed() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Mx;

        let err = session.skip().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(session.step, WizardStep::Mx, "failed skip must not advance");

        session.apply_check(DnsCheckKind::Mx, &pass_check());
        session.skip().unwrap();
        assert_eq!(session.step, WizardStep::Spf);
        // a verified required step is advanced, not marked skipped
        assert!(session.checks.mx.passed);
    }

    #[test]
    fn optional_step_skip_always_succeeds() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Spf;

        session.skip().unwrap();
        assert_eq!(session.step, WizardStep::Dkim);
        assert!(session.checks.spf.checked);
        assert!(!session.checks.spf.passed);
        assert_eq!(session.checks.spf.message.as_deref(), Some("Skipped"));
    }

    #[test]
    fn continue_gated_on_pass_for_required_step() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Mx;
        assert!(!session.can_continue());
        assert!(session.try_continue().is_err());

        session.apply_check(DnsCheckKind::Mx, &fail_check());
        assert!(!session.can_continue(), "failed check must not unlock mx");

        session.apply_check(DnsCheckKind::Mx, &pass_check());
        assert!(session.can_continue());
        session.try_continue().unwrap();
        assert_eq!(session.step, WizardStep::Spf);
    }

    #[test]
    fn continue_open_on_optional_steps() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Dmarc;
        assert!(session.can_continue());
        session.try_continue().unwrap();
        assert_eq!(session.step, WizardStep::Review);
    }

    #[test]
    fn transitions_move_index_by_exactly_one() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Spf;

        let before = session.step.index();
        session.skip().unwrap();
        assert_eq!(session.step.index(), before + 1);

        session.go_back().unwrap();
        assert_eq!(session.step.index(), before);
    }

    #[test]
    fn back_unavailable_on_first_and_last_step() {
        let mut session = WizardSession::new();
        assert!(!session.can_go_back());
        assert!(session.go_back().is_err());

        session.step = WizardStep::Review;
        assert!(!session.can_go_back());
        assert!(session.go_back().is_err());

        session.step = WizardStep::Mx;
        session.go_back().unwrap();
        assert_eq!(session.step, WizardStep::Domain);
    }

    #[test]
    fn verification_records_result_without_advancing() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Mx;

        session.apply_check(DnsCheckKind::Mx, &fail_check());
        assert_eq!(session.step, WizardStep::Mx);
        assert!(session.checks.mx.checked);
        assert!(!session.checks.mx.passed);
        assert_eq!(session.checks.mx.message.as_deref(), Some("missing"));

        // unbounded retries: verify again, result replaces the old one
        session.apply_check(DnsCheckKind::Mx, &pass_check());
        assert!(session.checks.mx.passed);
    }

    #[test]
    fn reset_clears_everything_from_any_step() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Dmarc;
        session.domain_name = "example.com".to_string();
        session.domain_id = Some("d-1".to_string());
        session.apply_check(DnsCheckKind::Mx, &pass_check());
        session.create_state = ActionState::Succeeded;

        session.reset();
        assert_eq!(session.step, WizardStep::Domain);
        assert!(session.domain_name.is_empty());
        assert!(session.domain_id.is_none());
        for kind in DnsCheckKind::ALL {
            assert_eq!(*session.checks.get(kind), StepStatus::default());
        }
        assert_eq!(session.create_state, ActionState::Idle);
    }

    #[test]
    fn progress_percent_is_derived_from_index() {
        let mut session = WizardSession::new();
        assert_eq!(session.progress_percent(), 16);
        session.step = WizardStep::Review;
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn mx_warning_follows_mx_status() {
        let mut session = WizardSession::new();
        assert!(session.mx_warning());
        session.apply_check(DnsCheckKind::Mx, &pass_check());
        assert!(!session.mx_warning());
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut session = WizardSession::new();
        session.step = WizardStep::Spf;
        session.domain_name = "example.com".to_string();
        session.domain_id = Some("d-1".to_string());

        let json = serde_json::to_string(&session).unwrap();
        let restored: WizardSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.step, WizardStep::Spf);
        assert_eq!(restored.domain_id.as_deref(), Some("d-1"));
    }
}
