/// Record store adapters for the product catalog
mod in_memory_repository;
mod json_file_repository;

pub use in_memory_repository::InMemoryProductRepository;
pub use json_file_repository::JsonFileProductRepository;
