pub mod analysis;
pub mod auth;
pub mod email;
pub mod storage;
pub mod valuation;
