pub mod scanner;
pub mod source;
