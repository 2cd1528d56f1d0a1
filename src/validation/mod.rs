/// Structural validation of email addresses.
///
/// Splits an address into its local part and domain on the single `@`
/// separator and enforces the permitted character sets on both sides. Pure
/// functions, no network access.
pub mod syntax;

/// DNS resolution of email domains.
///
/// Looks up address (A/AAAA) and mail exchanger (MX) records concurrently,
/// each bounded by a configurable timeout, and classifies failures so the
/// pipeline can distinguish "does not exist" from "could not verify".
pub mod dnsmx;

/// Disposable-email provider classification.
///
/// Process-wide, read-mostly registry of known throwaway-email domains with
/// case-insensitive membership lookups and atomic whole-set reloads.
pub mod disposable;

/// Orchestration of the validation stages.
///
/// Runs format, domain and disposable checks in fixed order, accumulates
/// diagnostic messages and produces the final verdict under the configured
/// policy.
pub mod pipeline;
