pub mod category_handler;
pub mod portability_handler;

pub use category_handler::*;
pub use portability_handler::*;
