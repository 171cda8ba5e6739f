pub mod constants;
pub mod portability;
pub mod search;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
