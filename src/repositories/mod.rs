//! Alternative user store implementations.

pub mod memory_repo;

pub use memory_repo::MemoryUserRepository;
