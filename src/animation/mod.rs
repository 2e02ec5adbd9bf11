pub(crate) mod ease;
pub(crate) mod props;
pub(crate) mod value;
