pub mod bbox;
pub mod face;
pub mod model;
pub mod point;

pub use bbox::*;
pub use face::*;
pub use model::*;
pub use point::*;
