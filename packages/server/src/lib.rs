// Property Valuation Service - API Core
//
// Values a property from live market listings (search model → extraction model →
// deterministic valuation engine) and fronts the email, storage and magic-link
// auth providers used by the web client.
//
// Collaborators sit behind kernel traits; domains/* hold the business logic.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
