pub mod dns;

pub use dns::{BuildResponseUseCase, ForwardFailure, ResponseOutcome};
