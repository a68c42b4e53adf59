pub mod cookie;
pub mod extractor;
pub mod jwt;
pub mod password;
