pub mod categories;
pub mod health;
pub mod my_modules;
