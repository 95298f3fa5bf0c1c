//! Configuration presets, JSON config files and the copy/paste text format.

pub mod load;
pub mod presets;
pub mod schema;
pub mod text;

pub use load::*;
pub use presets::*;
pub use schema::*;
pub use text::*;
