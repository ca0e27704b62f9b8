mod file;
mod interface;
mod local;
pub use file::*;
pub use interface::*;
pub use local::*;
