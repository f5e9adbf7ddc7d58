pub mod expand;
pub mod sweep;
