pub(crate) mod core;
pub(crate) mod navigator;
pub(crate) mod ops;
pub(crate) mod options;
pub(crate) mod stage;
