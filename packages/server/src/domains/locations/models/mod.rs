pub mod camera;
pub mod location;

pub use camera::*;
pub use location::*;
