//! Domain setup wizard orchestration.
//!
//! The service owns every side-effectful action of the wizard: creating the
//! registry row, running DNS verification, and activating the domain. Pure
//! transitions (continue, skip, back, reset) live on
//! [`WizardSession`] itself and are called directly by front-ends.

use std::sync::Arc;

use domain_wizard_registry::{CreateDomainRequest, DomainPatch};
use domain_wizard_verifier::{CheckStatus, RecordCheck};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    expected_dns_records, ActionState, DnsRecordTemplate, StepStatus, WizardSession, WizardStep,
};
use crate::utils::domain_name;

/// Error shown when the entered domain fails validation.
const INVALID_DOMAIN_MSG: &str = "Please enter a valid domain name";

/// Domain setup wizard service
pub struct WizardService {
    ctx: Arc<ServiceContext>,
}

impl WizardService {
    /// Create a wizard service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Fresh session for a newly opened wizard.
    #[must_use]
    pub fn new_session(&self) -> WizardSession {
        WizardSession::new()
    }

    /// Records the administrator must create for the session's domain,
    /// for display and copy-to-clipboard.
    #[must_use]
    pub fn dns_records(&self, session: &WizardSession) -> Vec<DnsRecordTemplate> {
        expected_dns_records(&session.domain_name, &self.ctx.config)
    }

    /// "Continue" on the `domain` step: validate the entered name, create
    /// the registry row (inactive), and advance to `mx`.
    ///
    /// On failure the session stays on `domain` with the create state set to
    /// `Failed`, and the administrator may retry.
    pub async fn submit_domain(
        &self,
        session: &mut WizardSession,
        input: &str,
        is_premium_only: bool,
    ) -> CoreResult<()> {
        if session.step != WizardStep::Domain {
            return Err(session.invalid("create domain"));
        }
        if session.create_state.is_in_flight() {
            return Err(CoreError::ActionInFlight {
                action: "create domain".to_string(),
            });
        }

        let normalized = domain_name::normalize(input);
        if !domain_name::is_valid(&normalized) {
            return Err(CoreError::ValidationError(INVALID_DOMAIN_MSG.to_string()));
        }

        session.create_state = ActionState::InFlight;
        let request = CreateDomainRequest::new(format!("@{normalized}"), is_premium_only);

        match self.ctx.domain_registry.add_domain(&request).await {
            Ok(record) => {
                log::info!("Domain {normalized} created as {}", record.id);
                session.domain_id = Some(record.id);
                session.domain_name = normalized;
                session.is_premium_only = is_premium_only;
                session.create_state = ActionState::Succeeded;
                session.advance()
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Domain creation failed for {normalized}: {e}");
                } else {
                    log::error!("Domain creation failed for {normalized}: {e}");
                }
                session.create_state = ActionState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// "Verify Record" on a check step: run the live checks and record the
    /// result for the current step. Never advances; the administrator may
    /// verify an unbounded number of times.
    pub async fn verify_current_step(&self, session: &mut WizardSession) -> CoreResult<StepStatus> {
        let Some(kind) = session.step.check_kind() else {
            return Err(session.invalid("verify"));
        };
        if session.domain_name.is_empty() {
            // unreachable through the forward-only flow, checked defensively
            return Err(CoreError::ValidationError(
                "Domain name is required".to_string(),
            ));
        }

        let expected = self.ctx.config.expected_records(&session.domain_name);
        let report = self
            .ctx
            .dns_verifier
            .verify_domain(&session.domain_name, &expected)
            .await?;

        let check = report.check(kind).cloned().unwrap_or_else(|| RecordCheck {
            status: CheckStatus::Fail,
            message: "Verification returned no result for this record".to_string(),
            found: Vec::new(),
        });
        session.apply_check(kind, &check);
        Ok(session.checks.get(kind).clone())
    }

    /// "Activate Domain" on the `review` step: flip the registry row active
    /// and reset the session. Not gated on the MX check; the review screen
    /// surfaces [`WizardSession::mx_warning`] instead.
    pub async fn activate(&self, session: &mut WizardSession) -> CoreResult<()> {
        if session.step != WizardStep::Review {
            return Err(session.invalid("activate"));
        }
        if session.activate_state.is_in_flight() {
            return Err(CoreError::ActionInFlight {
                action: "activate".to_string(),
            });
        }
        // Checked before any network call is issued.
        let Some(domain_id) = session.domain_id.clone() else {
            return Err(CoreError::DomainIdMissing);
        };

        session.activate_state = ActionState::InFlight;
        match self
            .ctx
            .domain_registry
            .update_domain(&domain_id, &DomainPatch::activate())
            .await
        {
            Ok(record) => {
                log::info!("Domain {} activated", record.name);
                session.reset();
                Ok(())
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Activation failed for {domain_id}: {e}");
                } else {
                    log::error!("Activation failed for {domain_id}: {e}");
                }
                session.activate_state = ActionState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::test_utils::create_test_wizard_service;
    use domain_wizard_registry::DomainRegistry;
    use domain_wizard_verifier::DnsCheckKind;

    #[tokio::test]
    async fn submit_domain_normalizes_creates_and_advances() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();

        svc.submit_domain(&mut session, " TEST.Example.COM ", false)
            .await
            .unwrap();

        assert_eq!(session.step, WizardStep::Mx);
        assert_eq!(session.domain_name, "test.example.com");
        assert_eq!(session.create_state, ActionState::Succeeded);

        let id = session.domain_id.clone().unwrap();
        let record = registry.get_domain(&id).await.unwrap();
        assert_eq!(record.name, "@test.example.com");
        assert!(!record.is_active, "created rows stay inactive until review");
    }

    #[tokio::test]
    async fn submit_domain_rejects_invalid_input_without_calling_registry() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();

        for input in ["", "not a domain", "a.c"] {
            let err = svc.submit_domain(&mut session, input, false).await.unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)), "input {input:?}");
        }

        assert_eq!(session.step, WizardStep::Domain);
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_domain_surfaces_registry_error_and_stays() {
        let (svc, registry, _) = create_test_wizard_service();
        registry
            .set_error(Some(RegistryError::DomainExists {
                domain: "@example.com".to_string(),
                raw_message: None,
            }))
            .await;

        let mut session = svc.new_session();
        let err = svc
            .submit_domain(&mut session, "example.com", false)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Registry(RegistryError::DomainExists { .. })));
        assert_eq!(session.step, WizardStep::Domain);
        assert!(session.domain_id.is_none());
        assert!(matches!(session.create_state, ActionState::Failed(_)));

        // manual retry succeeds once the registry recovers
        registry.set_error(None).await;
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();
        assert_eq!(session.step, WizardStep::Mx);
    }

    #[tokio::test]
    async fn submit_domain_rejected_while_in_flight() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        session.create_state = ActionState::InFlight;

        let err = svc
            .submit_domain(&mut session, "example.com", false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ActionInFlight { .. }));
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_domain_rejected_off_the_domain_step() {
        let (svc, _, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        session.step = WizardStep::Review;

        let err = svc
            .submit_domain(&mut session, "example.com", false)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn verify_records_result_for_current_step_only() {
        let (svc, _, verifier) = create_test_wizard_service();
        verifier.set_pass(DnsCheckKind::Mx, "MX record points at mail.example.com");

        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();

        let status = svc.verify_current_step(&mut session).await.unwrap();
        assert!(status.checked);
        assert!(status.passed);
        assert_eq!(session.step, WizardStep::Mx, "verify must not advance");
        assert!(!session.checks.spf.checked, "other checks untouched");
    }

    #[tokio::test]
    async fn verify_failure_leaves_status_untouched() {
        let (svc, _, verifier) = create_test_wizard_service();
        verifier.set_unreachable("resolver offline");

        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();

        let err = svc.verify_current_step(&mut session).await.unwrap_err();
        assert!(matches!(err, CoreError::Verifier(_)));
        assert!(!session.checks.mx.checked);
        assert_eq!(session.step, WizardStep::Mx);
    }

    #[tokio::test]
    async fn verify_rejected_on_non_check_steps() {
        let (svc, _, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        assert!(svc.verify_current_step(&mut session).await.is_err());

        session.step = WizardStep::Review;
        assert!(svc.verify_current_step(&mut session).await.is_err());
    }

    #[tokio::test]
    async fn activate_without_domain_id_issues_zero_calls() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        session.step = WizardStep::Review;

        let err = svc.activate(&mut session).await.unwrap_err();
        assert!(matches!(err, CoreError::DomainIdMissing));
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn activate_flips_row_and_resets_session() {
        let (svc, registry, verifier) = create_test_wizard_service();
        verifier.set_pass(DnsCheckKind::Mx, "ok");

        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", true)
            .await
            .unwrap();
        let id = session.domain_id.clone().unwrap();

        svc.verify_current_step(&mut session).await.unwrap();
        session.try_continue().unwrap(); // mx -> spf
        session.skip().unwrap(); // spf -> dkim
        session.skip().unwrap(); // dkim -> dmarc
        session.skip().unwrap(); // dmarc -> review
        assert_eq!(session.step, WizardStep::Review);
        assert!(!session.mx_warning());

        svc.activate(&mut session).await.unwrap();

        let record = registry.get_domain(&id).await.unwrap();
        assert!(record.is_active);
        assert!(record.is_premium);

        // session is discarded after activation
        assert_eq!(session.step, WizardStep::Domain);
        assert!(session.domain_id.is_none());
    }

    #[tokio::test]
    async fn activation_is_not_gated_on_mx() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();
        let id = session.domain_id.clone().unwrap();

        // skip is rejected on mx while unverified; jump via review directly
        // the way a session restored from checkpoint could be
        session.step = WizardStep::Review;
        assert!(session.mx_warning(), "review must warn about unverified mx");

        svc.activate(&mut session).await.unwrap();
        assert!(registry.get_domain(&id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn activate_error_stays_on_review() {
        let (svc, registry, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();
        session.step = WizardStep::Review;

        registry
            .set_error(Some(RegistryError::NetworkError {
                detail: "connection reset".to_string(),
            }))
            .await;

        let err = svc.activate(&mut session).await.unwrap_err();
        assert!(matches!(err, CoreError::Registry(RegistryError::NetworkError { .. })));
        assert_eq!(session.step, WizardStep::Review);
        assert!(session.domain_id.is_some(), "session unchanged on failure");
        assert!(matches!(session.activate_state, ActionState::Failed(_)));
    }

    #[tokio::test]
    async fn dns_records_render_for_session_domain() {
        let (svc, _, _) = create_test_wizard_service();
        let mut session = svc.new_session();
        svc.submit_domain(&mut session, "example.com", false)
            .await
            .unwrap();

        let records = svc.dns_records(&session);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].value, "mail.example.com");
    }
}
