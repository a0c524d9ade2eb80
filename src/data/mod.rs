pub mod export;
pub mod grid;
pub mod selection;
pub mod slice;
pub mod surface;
pub mod window;
