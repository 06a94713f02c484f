//! Compute module - Individuals, operators and the generational loop.

mod archive;
mod error;
mod fitness;
mod genome;
mod population;
mod search;
mod selection;
mod variation;

pub use archive::*;
pub use error::*;
pub use fitness::*;
pub use genome::*;
pub use population::*;
pub use search::*;
pub use selection::*;
pub use variation::*;
