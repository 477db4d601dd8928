pub use error::InventoryError;
pub use filter::{Filter, FilterSettings};
pub use model::{quarantine_path, File, RunId};
pub use store::{Inventory, INVENTORY_VERSION};

mod error;
mod filter;
mod model;
pub mod size;
mod store;
