//! Database model definitions

mod amenity;
mod apartment;
mod profile;
mod reservation;

pub use amenity::*;
pub use apartment::*;
pub use profile::*;
pub use reservation::*;
