//! Platform-agnostic core - shared between the web backdrop and the native preview

pub mod color;
pub mod constellation;
pub mod cursor;
pub mod grid;
pub mod layout;
pub mod proximity;
pub mod throttle;
pub mod viewport;

pub use color::{ColorRef, Palette};
pub use constellation::{Constellation, ConstellationConfig};
pub use cursor::PointerConfig;
pub use grid::{DotGrid, GridConfig, Mark};
pub use layout::GridLayout;
pub use proximity::{PointerState, Proximity};
pub use throttle::Throttle;
