mod my_module;

pub use my_module::MyModule;
