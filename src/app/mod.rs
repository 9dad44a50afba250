pub mod event;
pub mod mode;
pub mod remote;
pub mod state;

pub use state::AppState;
