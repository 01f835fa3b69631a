//! Shared contracts between the CPI calculator frontend and its REST backend.
//!
//! DTOs mirror the backend wire format (camelCase JSON); the pure domain rules
//! that the client enforces live next to the types they govern.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
