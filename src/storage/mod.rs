mod coordinator;
mod store;

pub use coordinator::{persist_all, WriteReport};
pub use store::ProductStore;
