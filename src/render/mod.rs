pub mod plaid;
pub mod surface;

pub use plaid::render;
pub use surface::{Canvas, Surface};
