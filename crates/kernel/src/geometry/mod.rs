pub mod frame;
pub mod point;
pub mod vector;

pub use frame::OrientationFrame;
pub use point::Point3d;
pub use vector::Vec3;
