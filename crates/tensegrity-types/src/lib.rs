pub mod ids;
pub mod member;
pub mod primitives;

pub use ids::*;
pub use member::*;
pub use primitives::*;
