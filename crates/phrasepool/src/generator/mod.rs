mod interface;
mod template;
mod unique;
pub use interface::*;
pub use template::*;
pub use unique::*;
