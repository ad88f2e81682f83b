pub mod document;
pub mod page;
pub mod post;
pub mod utils;
