//! Valuation domain - turns extracted market listings into a property value
//!
//! Pure and synchronous. Nothing here performs I/O:
//!   RawComparable (untrusted) → normalize → Comparable → estimate_value → ValuationResult
//!
//! Every tunable constant lives in `ValuationSettings` and is passed in explicitly.

pub mod engine;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod settings;
pub mod sources;

pub use engine::{estimate_value, valuate, Estimate};
pub use error::ValuationError;
pub use models::{
    Comparable, MarketEvidence, OriginType, RawComparable, ValuationRequest, ValuationRequestBody,
    ValuationResult,
};
pub use normalizer::{normalize, NormalizeContext};
pub use settings::ValuationSettings;
pub use sources::source_domains;
