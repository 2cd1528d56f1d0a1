use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::ValidationConfig;
use crate::models::ValidationReport;
use crate::validation::disposable::DisposableRegistry;
use crate::validation::dnsmx::{DomainLookupOutcome, LookupErrorKind, ResolveDomain};
use crate::validation::syntax;

/// Margin added to the resolver bound before the pipeline gives up on a
/// resolve call; covers resolver implementations that fail to honor the
/// bound they were handed.
const RESOLVE_GRACE: Duration = Duration::from_millis(500);

/// Runs the validation stages in fixed order and aggregates the verdict.
///
/// Stage order: format check, domain resolution, disposable classification,
/// summary. A format failure is terminal — a malformed address cannot be
/// resolved meaningfully, so the resolver and registry are never consulted.
/// Every later stage runs even when an earlier one already decided the
/// verdict, because the contract is to report all available diagnostics.
pub struct ValidationPipeline {
    resolver: Arc<dyn ResolveDomain>,
    registry: Arc<DisposableRegistry>,
    policy: ValidationConfig,
}

impl ValidationPipeline {
    pub fn new(
        resolver: Arc<dyn ResolveDomain>,
        registry: Arc<DisposableRegistry>,
        policy: ValidationConfig,
    ) -> Self {
        Self {
            resolver,
            registry,
            policy,
        }
    }

    /// Validates one address and returns the aggregated verdict.
    ///
    /// Never returns an error: every expected outcome — format violation,
    /// NXDOMAIN, lookup timeout, unreachable resolver, disposable domain —
    /// is folded into the report as data.
    pub async fn validate(&self, raw: &str) -> ValidationReport {
        let email = raw.trim();
        let mut report = ValidationReport::new(email);

        let address = match syntax::parse_address(email) {
            Ok(address) => address,
            Err(violation) => {
                report.note(format!("Invalid email format: {violation}"));
                return report;
            }
        };
        report.note("Email format is valid");

        let domain = address.domain();
        let outcome = self.resolve_bounded(domain).await;

        let mut deliverable = true;
        if outcome.exists {
            if outcome.has_mail_exchanger {
                report.note(format!("Domain '{domain}' exists and has mail exchanger records"));
            } else {
                report.note(format!("Domain '{domain}' exists and is reachable"));
                match outcome.error_kind {
                    Some(_) => report.note(format!(
                        "Mail exchanger status for '{domain}' could not be verified"
                    )),
                    None => report.note(format!(
                        "Domain '{domain}' has no mail exchanger records; mail may still be routed to its address records"
                    )),
                }
                if self.policy.require_mx {
                    deliverable = false;
                }
            }
        } else {
            match outcome.error_kind {
                Some(LookupErrorKind::Timeout) => report.note(format!(
                    "Could not verify domain '{domain}': DNS lookup timed out"
                )),
                Some(LookupErrorKind::Transport) => report.note(format!(
                    "Could not verify domain '{domain}': DNS resolver unavailable"
                )),
                None => report.note(format!("Domain '{domain}' does not exist")),
            }
            deliverable = false;
        }

        // The registry lookup is local and cheap, so it runs for completeness
        // of messages even when the domain already failed.
        if self.registry.is_disposable(domain) {
            report.note(format!(
                "Domain '{domain}' is a known disposable email provider"
            ));
            if self.policy.reject_disposable {
                deliverable = false;
            }
        } else {
            report.note(format!(
                "Domain '{domain}' is not a known disposable email provider"
            ));
        }

        report.valid = deliverable;
        report.note(if report.valid {
            "Email validation successful"
        } else {
            "Email validation failed"
        });

        tracing::debug!(email = %report.email, valid = report.valid, "pipeline verdict");
        report
    }

    async fn resolve_bounded(&self, domain: &str) -> DomainLookupOutcome {
        let timeout = self.policy.dns_timeout;
        time::timeout(
            timeout + RESOLVE_GRACE,
            self.resolver.resolve(domain, timeout),
        )
        .await
        .unwrap_or_else(|_| DomainLookupOutcome::timed_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::dnsmx::MockResolveDomain;
    use async_trait::async_trait;
    use std::time::Instant;

    fn pipeline(
        resolver: MockResolveDomain,
        registry: DisposableRegistry,
        policy: ValidationConfig,
    ) -> ValidationPipeline {
        ValidationPipeline::new(Arc::new(resolver), Arc::new(registry), policy)
    }

    fn resolver_returning(outcome: DomainLookupOutcome) -> MockResolveDomain {
        let mut resolver = MockResolveDomain::new();
        resolver.expect_resolve().returning(move |_, _| outcome);
        resolver
    }

    #[tokio::test]
    async fn valid_address_produces_four_messages_in_order() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, true)),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("test@example.com").await;

        assert_eq!(report.email, "test@example.com");
        assert!(report.valid);
        assert_eq!(report.messages.len(), 4);
        assert_eq!(report.messages[0], "Email format is valid");
        assert!(report.messages[1].contains("example.com"));
        assert!(report.messages[2].contains("not a known disposable"));
        assert_eq!(report.messages[3], "Email validation successful");
    }

    #[tokio::test]
    async fn malformed_address_short_circuits_without_resolving() {
        let mut resolver = MockResolveDomain::new();
        resolver.expect_resolve().times(0);
        let pipeline = pipeline(
            resolver,
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("not-an-email").await;

        assert!(!report.valid);
        assert_eq!(report.messages.len(), 1);
        assert!(report.messages[0].starts_with("Invalid email format"));
    }

    #[tokio::test]
    async fn input_is_trimmed_before_validation() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, true)),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("  test@example.com  ").await;

        assert_eq!(report.email, "test@example.com");
        assert!(report.valid);
    }

    #[tokio::test]
    async fn nonexistent_domain_fails_but_still_reports_disposable_status() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(false, false)),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@nonexistent-domain.example").await;

        assert!(!report.valid);
        assert_eq!(report.messages.len(), 4);
        assert!(report.messages[1].contains("does not exist"));
        assert!(report.messages[2].contains("disposable"));
        assert_eq!(report.messages[3], "Email validation failed");
    }

    #[tokio::test]
    async fn timeout_wording_differs_from_nxdomain() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::timed_out()),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@slow-resolver.example").await;

        assert!(!report.valid);
        assert!(report.messages[1].contains("timed out"));
        assert!(!report.messages[1].contains("does not exist"));
    }

    #[tokio::test]
    async fn transport_failure_reads_as_could_not_verify() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::unreachable()),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@example.com").await;

        assert!(!report.valid);
        assert!(report.messages[1].contains("Could not verify"));
        assert!(report.messages[1].contains("resolver unavailable"));
    }

    #[tokio::test]
    async fn mx_less_domain_is_valid_with_a_caution_by_default() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, false)),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@example.com").await;

        assert!(report.valid);
        assert!(report.messages[2].contains("no mail exchanger records"));
        assert_eq!(report.messages.len(), 5);
    }

    #[tokio::test]
    async fn require_mx_policy_fails_mx_less_domains() {
        let policy = ValidationConfig {
            require_mx: true,
            ..ValidationConfig::default()
        };
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, false)),
            DisposableRegistry::with_defaults(),
            policy,
        );

        let report = pipeline.validate("user@example.com").await;

        assert!(!report.valid);
        assert!(report.messages.last().unwrap().contains("failed"));
    }

    #[tokio::test]
    async fn unverified_mx_status_is_worded_as_unverified() {
        let outcome = DomainLookupOutcome {
            exists: true,
            has_mail_exchanger: false,
            error_kind: Some(LookupErrorKind::Timeout),
        };
        let pipeline = pipeline(
            resolver_returning(outcome),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@example.com").await;

        assert!(report.valid);
        assert!(report.messages[2].contains("could not be verified"));
    }

    #[tokio::test]
    async fn disposable_domain_is_advisory_by_default() {
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, true)),
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let report = pipeline.validate("user@mailinator.com").await;

        assert!(report.valid);
        assert!(report.messages[2].contains("known disposable email provider"));
        assert_eq!(report.messages[3], "Email validation successful");
    }

    #[tokio::test]
    async fn reject_disposable_policy_fails_the_verdict() {
        let policy = ValidationConfig {
            reject_disposable: true,
            ..ValidationConfig::default()
        };
        let pipeline = pipeline(
            resolver_returning(DomainLookupOutcome::resolved(true, true)),
            DisposableRegistry::with_defaults(),
            policy,
        );

        let report = pipeline.validate("user@mailinator.com").await;

        assert!(!report.valid);
        assert!(report.messages[2].contains("known disposable email provider"));
        assert_eq!(report.messages[3], "Email validation failed");
    }

    #[tokio::test]
    async fn repeated_runs_over_identical_dns_state_are_identical() {
        let mut resolver = MockResolveDomain::new();
        resolver
            .expect_resolve()
            .times(2)
            .returning(|_, _| DomainLookupOutcome::resolved(true, true));
        let pipeline = pipeline(
            resolver,
            DisposableRegistry::with_defaults(),
            ValidationConfig::default(),
        );

        let first = pipeline.validate("test@example.com").await;
        let second = pipeline.validate("test@example.com").await;

        assert_eq!(first, second);
    }

    /// Resolver that never answers; exercises the pipeline's outer bound.
    struct PendingResolver;

    #[async_trait]
    impl ResolveDomain for PendingResolver {
        async fn resolve(&self, _domain: &str, _timeout: Duration) -> DomainLookupOutcome {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn unresponsive_resolver_does_not_hang_the_pipeline() {
        let policy = ValidationConfig {
            dns_timeout: Duration::from_millis(50),
            ..ValidationConfig::default()
        };
        let pipeline = ValidationPipeline::new(
            Arc::new(PendingResolver),
            Arc::new(DisposableRegistry::with_defaults()),
            policy,
        );

        let started = Instant::now();
        let report = pipeline.validate("user@example.com").await;

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(!report.valid);
        assert!(report.messages[1].contains("timed out"));
    }
}
