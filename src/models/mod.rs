pub mod item;
pub mod supplier;
pub mod wholesaler;
