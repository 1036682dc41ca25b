//! Mathematical functions over real and complex arguments

pub mod dispatch;
mod log;
mod special;

pub use dispatch::{Dispatched, Domain, FunctionSpec, FUNCTIONS};
pub use log::Log;
pub use special::{BesselJ, BesselY, Beta};
