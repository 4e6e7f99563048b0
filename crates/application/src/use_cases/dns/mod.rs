mod build_response;

pub use build_response::{BuildResponseUseCase, ForwardFailure, ResponseOutcome};
