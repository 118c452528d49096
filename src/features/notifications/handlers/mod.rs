mod token_handler;

pub use token_handler::*;
