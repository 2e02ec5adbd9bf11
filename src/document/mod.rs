pub(crate) mod geometry;
pub(crate) mod select;
pub(crate) mod tree;
pub(crate) mod write;
