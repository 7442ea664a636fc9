pub use self::{cell::*, field::*, piece::*};

pub(crate) mod cell;
pub(crate) mod field;
pub(crate) mod piece;
