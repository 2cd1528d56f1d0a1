use std::time::Duration;

use async_trait::async_trait;
use tokio::time;
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
};

/// How a single DNS lookup failed, when it failed for infrastructure reasons
/// rather than because the records are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// The lookup did not complete within the configured bound.
    Timeout,
    /// The resolver was unreachable or the exchange failed at the protocol
    /// level.
    Transport,
}

/// Result of resolving a domain for deliverability.
///
/// `exists` is true when the domain has address records or mail exchanger
/// records. NXDOMAIN is a definitive negative and carries no `error_kind`;
/// timeouts and transport failures set `error_kind` so callers can word
/// "could not verify" differently from "does not exist".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainLookupOutcome {
    pub exists: bool,
    pub has_mail_exchanger: bool,
    pub error_kind: Option<LookupErrorKind>,
}

impl DomainLookupOutcome {
    pub fn resolved(exists: bool, has_mail_exchanger: bool) -> Self {
        Self {
            exists,
            has_mail_exchanger,
            error_kind: None,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            exists: false,
            has_mail_exchanger: false,
            error_kind: Some(LookupErrorKind::Timeout),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            exists: false,
            has_mail_exchanger: false,
            error_kind: Some(LookupErrorKind::Transport),
        }
    }
}

/// DNS resolution seam for the validation pipeline.
///
/// Abstracting the resolver keeps the pipeline testable without network
/// access; tests drive it with a mock and assert on call counts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolveDomain: Send + Sync {
    /// Resolves `domain`, bounding each underlying lookup by `timeout`.
    ///
    /// Expected DNS failures (NXDOMAIN, timeouts, unreachable resolver) are
    /// folded into the outcome and never returned as errors.
    async fn resolve(&self, domain: &str, timeout: Duration) -> DomainLookupOutcome;
}

/// Classification of a single record-type lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordAnswer {
    /// At least one record of the requested type resolved.
    Found,
    /// The name exists but has no records of the requested type.
    Empty,
    /// The name does not exist.
    NxDomain,
    Timeout,
    Transport,
}

impl RecordAnswer {
    fn from_resolve_error(err: &ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                if *response_code == ResponseCode::NXDomain {
                    Self::NxDomain
                } else {
                    Self::Empty
                }
            }
            ResolveErrorKind::Timeout => Self::Timeout,
            _ => Self::Transport,
        }
    }
}

/// Domain resolver backed by trust-dns.
///
/// Issues the address-record and MX lookups concurrently, each under its own
/// timeout, so a stalled query for one record type does not hold up the
/// other beyond its bound. Single attempt per lookup; worst-case latency is
/// the configured timeout, not a multiple of it.
pub struct DnsDomainResolver {
    resolver: TokioAsyncResolver,
}

impl DnsDomainResolver {
    /// Creates a resolver with the default upstream configuration.
    ///
    /// `timeout` is also installed as the resolver's own per-request bound so
    /// the library and the calling code agree on the same limit.
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
        }
    }
}

#[async_trait]
impl ResolveDomain for DnsDomainResolver {
    async fn resolve(&self, domain: &str, timeout: Duration) -> DomainLookupOutcome {
        let address_lookup = time::timeout(timeout, self.resolver.lookup_ip(domain));
        let mx_lookup = time::timeout(timeout, self.resolver.mx_lookup(domain));
        let (address, mx) = futures::join!(address_lookup, mx_lookup);

        let address = match address {
            Ok(Ok(lookup)) => {
                if lookup.iter().next().is_some() {
                    RecordAnswer::Found
                } else {
                    RecordAnswer::Empty
                }
            }
            Ok(Err(err)) => {
                tracing::debug!(domain, error = %err, "address lookup failed");
                RecordAnswer::from_resolve_error(&err)
            }
            Err(_) => RecordAnswer::Timeout,
        };

        let mx = match mx {
            Ok(Ok(lookup)) => {
                if lookup.iter().next().is_some() {
                    RecordAnswer::Found
                } else {
                    RecordAnswer::Empty
                }
            }
            Ok(Err(err)) => {
                tracing::debug!(domain, error = %err, "mx lookup failed");
                RecordAnswer::from_resolve_error(&err)
            }
            Err(_) => RecordAnswer::Timeout,
        };

        merge_answers(address, mx)
    }
}

/// Combines the two per-record-type answers into one outcome.
///
/// An NXDOMAIN answer is authoritative: when neither lookup found records,
/// it wins over a concurrent infrastructure failure on the other query.
fn merge_answers(address: RecordAnswer, mx: RecordAnswer) -> DomainLookupOutcome {
    let has_mail_exchanger = mx == RecordAnswer::Found;
    let exists = address == RecordAnswer::Found || has_mail_exchanger;

    let error_kind = if !exists
        && (address == RecordAnswer::NxDomain || mx == RecordAnswer::NxDomain)
    {
        None
    } else {
        infrastructure_failure(address, mx)
    };

    DomainLookupOutcome {
        exists,
        has_mail_exchanger,
        error_kind,
    }
}

fn infrastructure_failure(a: RecordAnswer, b: RecordAnswer) -> Option<LookupErrorKind> {
    if a == RecordAnswer::Timeout || b == RecordAnswer::Timeout {
        Some(LookupErrorKind::Timeout)
    } else if a == RecordAnswer::Transport || b == RecordAnswer::Transport {
        Some(LookupErrorKind::Transport)
    } else {
        None
    }
}
