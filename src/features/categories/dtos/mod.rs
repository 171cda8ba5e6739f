mod category_dto;
mod transfer_dto;

pub use category_dto::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, ListCategoriesQuery,
    ListChildrenQuery, UpdateCategoryDto,
};
pub use transfer_dto::CategoryTransferDto;
