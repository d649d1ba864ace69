pub mod catalog;
pub mod composer;
pub mod composition;
pub mod constants;
pub mod error;
pub mod monitor;
pub mod params;
pub mod pool;
pub mod primitive;
pub mod probe;
pub mod proximity;
pub mod registry;

pub use composer::*;
pub use composition::*;
pub use constants::*;
pub use error::*;
pub use monitor::*;
pub use params::*;
pub use pool::*;
pub use primitive::*;
pub use probe::*;
pub use proximity::*;
pub use registry::*;
