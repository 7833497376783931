//! Business logic: account registration, login and profile.

pub mod account;

pub use account::AccountService;
