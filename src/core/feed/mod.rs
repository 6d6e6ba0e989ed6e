pub mod fetcher;
pub mod mapper;
pub mod parser;
pub mod types;
