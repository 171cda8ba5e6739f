pub mod my_module_handler;

pub use my_module_handler::*;
