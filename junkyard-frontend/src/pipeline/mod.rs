mod put;
mod restore;

pub use put::put;
pub use restore::restore;
