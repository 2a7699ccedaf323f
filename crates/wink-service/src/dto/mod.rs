//! Data transfer objects handed across the service boundary
//!
//! - Request DTOs with validation for caller input
//! - Response DTOs for serializing results
//! - Mappers from domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::ListWinksRequest;
pub use responses::{SendWinkResponse, WinkResponse, WinkStatusResponse};
