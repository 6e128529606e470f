/// UI widgets module
///
/// View helpers that are more than a one-liner live here, keeping the main
/// view function readable:
/// - The result/error readout cards (readout.rs)
pub mod readout;
