pub mod error;
pub mod interface;
pub mod languages;
pub mod detector;
pub mod model;
pub mod invoker;
pub mod orchestrator;
pub mod factory;

pub use error::{TranslateError, TranslateResult};
pub use interface::{TranslationModel, TranslationRequest, TranslationResult};
pub use orchestrator::BatchOrchestrator;
pub use factory::TranslateFactory;
