//! Domain models: accounts and the movie catalogue.

pub mod account;
pub mod movie;

pub use account::{
    Account, AccountChanges, LoginRequest, NewAccount, RegisterRequest, UpdateAccountRequest,
};
pub use movie::{Director, Genre, Movie};
