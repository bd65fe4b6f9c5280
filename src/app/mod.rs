//! Application layer containing business logic and shared state.

pub mod state;
pub mod usecases;

pub use state::AppState;
pub use usecases::{CreateCustomerUseCase, ListCustomerUseCase};
