mod comparable;
mod request;
mod result;

pub use comparable::{Comparable, OriginType, RawComparable};
pub use request::{ValuationRequest, ValuationRequestBody};
pub use result::{MarketEvidence, ValuationResult};
