//! Record rendering shared by every tier: structured fields and the console line encoder.

mod encoder;
mod field;

pub use encoder::{ConsoleEncoder, trim_caller};
pub use field::Field;
