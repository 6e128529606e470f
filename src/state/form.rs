/// The comparison submission form
///
/// Holds what the operator has entered so far and turns it into a
/// `CompareRequest` once it passes validation. Validation is pure: no I/O
/// happens here, so an invalid form can never produce a network request.
use thiserror::Error;

use crate::source::ImagePayload;

/// Minimum accepted registration number length
pub const MIN_IDENTIFIER_LEN: usize = 6;

/// Which backend comparison model processes the image pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmVariant {
    /// Deep-embedding face comparison
    #[default]
    DeepFace,
    /// Classical image recognition comparison
    ImageRecognition,
}

impl AlgorithmVariant {
    /// All variants, in dropdown order
    pub const ALL: [AlgorithmVariant; 2] = [
        AlgorithmVariant::DeepFace,
        AlgorithmVariant::ImageRecognition,
    ];

    /// Path of the comparison endpoint for this variant, relative to the
    /// configured service base URL
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            AlgorithmVariant::DeepFace => "/api/compare_image_deepface",
            AlgorithmVariant::ImageRecognition => "/api/compare_image_recognition",
        }
    }
}

impl std::fmt::Display for AlgorithmVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmVariant::DeepFace => write!(f, "DeepFace"),
            AlgorithmVariant::ImageRecognition => write!(f, "Image Recognition"),
        }
    }
}

/// Local validation failures, surfaced without touching the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("the registration number must be at least {} characters", MIN_IDENTIFIER_LEN)]
    IdentifierTooShort,

    #[error("select an image to compare first")]
    MissingImage,
}

/// A validated, ready-to-send comparison request
#[derive(Debug, Clone, PartialEq)]
pub struct CompareRequest {
    pub registration_number: String,
    pub image: ImagePayload,
    pub variant: AlgorithmVariant,
}

/// Everything the operator has entered into the form
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    /// Registration number as typed (trimmed during validation)
    pub identifier: String,
    /// Selected or captured photo, if any
    pub image: Option<ImagePayload>,
    /// Currently selected comparison model
    pub variant: AlgorithmVariant,
}

impl SubmissionForm {
    /// Check the form and build the outgoing request
    ///
    /// Identifier checks run before image checks, mirroring the order the
    /// errors appear in the interface.
    pub fn validate(&self) -> Result<CompareRequest, ValidationError> {
        let identifier = self.identifier.trim();
        if identifier.chars().count() < MIN_IDENTIFIER_LEN {
            return Err(ValidationError::IdentifierTooShort);
        }

        let image = self.image.clone().ok_or(ValidationError::MissingImage)?;

        Ok(CompareRequest {
            registration_number: identifier.to_string(),
            image,
            variant: self.variant,
        })
    }

    /// Clear the identifier and photo for the next submission
    ///
    /// The selected comparison model survives the reset, so repeat
    /// submissions against the same backend need no re-selection.
    pub fn reset(&mut self) {
        self.identifier.clear();
        self.image = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> ImagePayload {
        ImagePayload {
            file_name: "photo.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
            width: 640,
            height: 480,
        }
    }

    fn filled_form() -> SubmissionForm {
        SubmissionForm {
            identifier: "202412345".to_string(),
            image: Some(sample_image()),
            variant: AlgorithmVariant::DeepFace,
        }
    }

    #[test]
    fn test_short_identifier_rejected() {
        let mut form = filled_form();
        form.identifier = "12345".to_string();

        assert_eq!(form.validate(), Err(ValidationError::IdentifierTooShort));
    }

    #[test]
    fn test_whitespace_padding_does_not_satisfy_minimum() {
        let mut form = filled_form();
        form.identifier = "  123  ".to_string();

        assert_eq!(form.validate(), Err(ValidationError::IdentifierTooShort));
    }

    #[test]
    fn test_missing_image_rejected() {
        let mut form = filled_form();
        form.image = None;

        assert_eq!(form.validate(), Err(ValidationError::MissingImage));
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = filled_form().validate().unwrap();

        assert_eq!(request.registration_number, "202412345");
        assert_eq!(request.variant, AlgorithmVariant::DeepFace);
        assert_eq!(request.image.file_name, "photo.jpg");
    }

    #[test]
    fn test_identifier_trimmed_in_request() {
        let mut form = filled_form();
        form.identifier = "  202412345  ".to_string();

        let request = form.validate().unwrap();
        assert_eq!(request.registration_number, "202412345");
    }

    #[test]
    fn test_reset_keeps_variant() {
        let mut form = filled_form();
        form.variant = AlgorithmVariant::ImageRecognition;

        form.reset();

        assert!(form.identifier.is_empty());
        assert!(form.image.is_none());
        assert_eq!(form.variant, AlgorithmVariant::ImageRecognition);
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(
            AlgorithmVariant::DeepFace.endpoint_path(),
            "/api/compare_image_deepface"
        );
        assert_eq!(
            AlgorithmVariant::ImageRecognition.endpoint_path(),
            "/api/compare_image_recognition"
        );
    }
}
