pub mod formatter;
pub mod printer;
pub mod prompt;
