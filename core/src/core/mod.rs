pub mod frame;
pub mod machine;
pub mod map;

pub use frame::{FrameBuffer, Rgb};
pub use machine::Machine;
pub use map::{AddressMap, Mapping};
