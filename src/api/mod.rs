/// Comparison service API module
///
/// This module handles:
/// - The HTTP client and multipart upload (client.rs)
/// - Decoding the success payload shapes (response.rs)
/// - Classified submission errors (error.rs)
pub mod client;
pub mod error;
pub mod response;
