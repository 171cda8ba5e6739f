mod my_module_service;

pub use my_module_service::MyModuleService;
