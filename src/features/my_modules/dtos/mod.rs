mod my_module_dto;

pub use my_module_dto::{
    CreateMyModuleDto, MyModuleResponseDto, MyModuleTransferDto, UpdateMyModuleDto,
};
