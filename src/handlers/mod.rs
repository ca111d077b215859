pub mod item;
pub mod supplier;
