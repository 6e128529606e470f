/// Submission error classification
///
/// The interface shows one generic failure headline, but the underlying
/// cause is kept structured so logs and the detail line can tell a dead
/// service apart from a rejected request or a malformed response.
use thiserror::Error;

/// What went wrong while talking to the comparison service
///
/// Variants carry rendered detail strings rather than source errors so the
/// value stays `Clone` and can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// The request never produced an HTTP response
    #[error("could not reach the comparison service: {0}")]
    Network(String),

    /// The request could not be assembled (e.g. a bad multipart part)
    #[error("could not build the comparison request: {0}")]
    Request(String),

    /// The service answered with a client-error status (4xx)
    #[error("the comparison service rejected the request (status {0})")]
    Rejected(u16),

    /// The service answered with a server-error or otherwise unexpected status
    #[error("the comparison service failed (status {0})")]
    Server(u16),

    /// A 2xx response arrived but its body did not decode
    #[error("could not decode the comparison response: {0}")]
    InvalidResponse(String),
}

impl CompareError {
    /// Generic headline shown above the specific detail
    pub const HEADLINE: &'static str = "Image comparison failed";

    /// Short classification label, used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            CompareError::Network(_) => "network",
            CompareError::Request(_) => "request",
            CompareError::Rejected(_) => "rejected",
            CompareError::Server(_) => "server",
            CompareError::InvalidResponse(_) => "invalid-response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(CompareError::Network("refused".into()).kind(), "network");
        assert_eq!(CompareError::Rejected(404).kind(), "rejected");
        assert_eq!(CompareError::Server(500).kind(), "server");
    }

    #[test]
    fn test_display_includes_status() {
        let error = CompareError::Server(502);
        assert_eq!(
            error.to_string(),
            "the comparison service failed (status 502)"
        );
    }
}
