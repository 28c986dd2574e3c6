pub mod boundary;
pub mod book;
pub mod enums;
pub mod episode;
pub mod frequency;

pub use book::*;
pub use enums::*;
pub use episode::*;
pub use frequency::*;
