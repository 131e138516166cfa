pub mod assemble;
pub mod dispatch;

pub use assemble::*;
pub use dispatch::*;
