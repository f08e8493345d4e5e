pub mod token;
pub mod upload;
pub mod utils;
