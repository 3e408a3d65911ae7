pub mod design;
pub mod diagnose;
pub mod generate;
pub mod spec;
pub mod table;

pub use design::*;
pub use diagnose::*;
pub use generate::*;
pub use spec::*;
pub use table::*;
