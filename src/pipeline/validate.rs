use thiserror::Error;

/// Why a completion result was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("empty response")]
    EmptyResponse,

    #[error("response shorter than input - likely truncated or code was altered/removed")]
    ShorterThanInput,
}

/// Outcome of validating a completion result against the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected(RejectReason),
}

/// Decide whether a completion result is an acceptable annotated version
/// of the original file.
///
/// The length check is a cheap necessary-but-not-sufficient safety net: it
/// catches gross truncation or content loss, not subtle corruption. Since
/// annotation only ever adds text, a trimmed result shorter than the
/// trimmed original cannot be a pure addition of comments.
pub fn validate(original: &str, candidate: &str) -> Validation {
    let candidate = candidate.trim();

    if candidate.is_empty() {
        return Validation::Rejected(RejectReason::EmptyResponse);
    }

    if candidate.len() < original.trim().len() {
        return Validation::Rejected(RejectReason::ShorterThanInput);
    }

    Validation::Accepted
}
