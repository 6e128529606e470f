/// Comparison response decoding
///
/// The service returns the similarity in one of two shapes: a flat number,
/// or an object carrying a threshold score plus a verification flag. Both
/// decode into the `SimilarityPayload` sum type and are then normalized
/// into a single `ComparisonResult` for display.
use serde::Deserialize;

/// The similarity field as sent on the wire
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SimilarityPayload {
    /// Threshold-style score with an explicit verification verdict
    Detailed { threshold: f64, verified: bool },
    /// Plain numeric score, no verdict attached
    Flat(f64),
}

/// Raw success body of a comparison request
///
/// `average_similarity` is the preferred field; some backends send the
/// equivalent `similarity` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareResponse {
    #[serde(default)]
    average_similarity: Option<SimilarityPayload>,
    #[serde(default)]
    similarity: Option<SimilarityPayload>,
    #[serde(default)]
    message: Option<String>,
}

/// Normalized comparison outcome shown to the operator
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonResult {
    /// Similarity score, whichever shape it arrived in
    pub score: Option<f64>,
    /// Verification verdict, only present for the detailed shape
    pub verified: Option<bool>,
    /// Optional human-readable message from the service
    pub message: Option<String>,
}

impl CompareResponse {
    /// Collapse both wire shapes into the displayed result
    pub fn into_result(self) -> ComparisonResult {
        let payload = self.average_similarity.or(self.similarity);

        let (score, verified) = match payload {
            Some(SimilarityPayload::Detailed { threshold, verified }) => {
                (Some(threshold), Some(verified))
            }
            Some(SimilarityPayload::Flat(value)) => (Some(value), None),
            None => (None, None),
        };

        ComparisonResult {
            score,
            verified,
            message: self.message,
        }
    }
}
