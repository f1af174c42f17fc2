//! Request and response schemas

pub mod amenity;
pub mod apartment;
pub mod pagination;
pub mod profile;
pub mod reservation;
