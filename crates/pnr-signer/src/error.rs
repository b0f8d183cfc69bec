/// Failures surfaced by the authorization core.
///
/// None of the messages carry key material; the transport layer maps
/// [`SignerError::code`] onto its own status codes.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Invalid user address: {0}")]
    InvalidUser(String),
    #[error("Invalid day id: {0}")]
    InvalidDayId(String),
    #[error("Malformed signing request: {0}")]
    MalformedRequest(String),
    #[error("No operator signing key is configured")]
    SigningUnavailable,
    #[error("Signing failed: {0}")]
    InternalFailure(String),
}

impl SignerError {
    /// Machine-readable error code returned to clients.
    pub fn code(&self) -> &'static str {
        match self {
            SignerError::InvalidUser(_) => "BAD_USER",
            SignerError::InvalidDayId(_) => "BAD_DAY_ID",
            SignerError::MalformedRequest(_) => "BAD_REQUEST",
            SignerError::SigningUnavailable => "MISSING_OPERATOR_PK",
            SignerError::InternalFailure(_) => "SIGN_FAIL",
        }
    }

    /// Whether resubmitting different input can fix the failure.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            SignerError::InvalidUser(_)
                | SignerError::InvalidDayId(_)
                | SignerError::MalformedRequest(_)
        )
    }
}
