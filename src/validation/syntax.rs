use thiserror::Error;

/// A structural violation found while parsing an email address.
///
/// Each variant carries enough detail to produce a human-readable diagnostic;
/// the `Display` text is surfaced verbatim in validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("address is empty")]
    Empty,
    #[error("address must contain an '@' separator")]
    MissingAt,
    #[error("address must contain exactly one '@' separator")]
    MultipleAt,
    #[error("local part before '@' is empty")]
    EmptyLocalPart,
    #[error("domain after '@' is empty")]
    EmptyDomain,
    #[error("local part contains the invalid character {0:?}")]
    InvalidLocalCharacter(char),
    #[error("domain must contain at least one '.'")]
    MissingTld,
    #[error("domain contains an empty label")]
    EmptyDomainLabel,
    #[error("domain label contains the invalid character {0:?}")]
    InvalidDomainCharacter(char),
    #[error("domain label must not start or end with a hyphen")]
    HyphenAtLabelEdge,
    #[error("top-level domain must be at least two letters")]
    InvalidTld,
}

/// An email address split into its local part and domain.
///
/// Borrowed from the raw input and request-scoped; the split is performed on
/// the single `@` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailAddress<'a> {
    local_part: &'a str,
    domain: &'a str,
}

impl<'a> EmailAddress<'a> {
    pub fn local_part(&self) -> &'a str {
        self.local_part
    }

    pub fn domain(&self) -> &'a str {
        self.domain
    }
}

/// Parses and validates the structure of an email address.
///
/// Checks the rules the rest of the pipeline relies on: exactly one `@`
/// separating non-empty parts, a restricted character set on both sides, and
/// a dotted domain ending in an alphabetic top-level label of at least two
/// characters.
///
/// Pure function, no I/O.
///
/// # Examples
/// ```
/// use email_verifier::validation::syntax::parse_address;
///
/// let address = parse_address("user.name+tag@example.com").unwrap();
/// assert_eq!(address.local_part(), "user.name+tag");
/// assert_eq!(address.domain(), "example.com");
///
/// assert!(parse_address("not-an-email").is_err());
/// ```
pub fn parse_address(raw: &str) -> Result<EmailAddress<'_>, FormatError> {
    if raw.is_empty() {
        return Err(FormatError::Empty);
    }

    let (local_part, domain) = raw.split_once('@').ok_or(FormatError::MissingAt)?;
    if domain.contains('@') {
        return Err(FormatError::MultipleAt);
    }
    if local_part.is_empty() {
        return Err(FormatError::EmptyLocalPart);
    }
    if domain.is_empty() {
        return Err(FormatError::EmptyDomain);
    }

    check_local_part(local_part)?;
    check_domain(domain)?;

    Ok(EmailAddress { local_part, domain })
}

/// Local parts are restricted to letters, digits and `._%+-`.
fn check_local_part(local: &str) -> Result<(), FormatError> {
    for c in local.chars() {
        if !c.is_ascii_alphanumeric() && !matches!(c, '.' | '_' | '%' | '+' | '-') {
            return Err(FormatError::InvalidLocalCharacter(c));
        }
    }
    Ok(())
}

/// Domain labels are letters, digits and interior hyphens; the final label
/// must be an alphabetic TLD of at least two characters.
fn check_domain(domain: &str) -> Result<(), FormatError> {
    if !domain.contains('.') {
        return Err(FormatError::MissingTld);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    for label in &labels {
        if label.is_empty() {
            return Err(FormatError::EmptyDomainLabel);
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(FormatError::HyphenAtLabelEdge);
        }
        for c in label.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(FormatError::InvalidDomainCharacter(c));
            }
        }
    }

    if let Some(tld) = labels.last() {
        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FormatError::InvalidTld);
        }
    }

    Ok(())
}
