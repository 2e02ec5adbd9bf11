pub(crate) mod diagram;
