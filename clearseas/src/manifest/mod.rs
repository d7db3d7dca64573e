pub(crate) mod builtin;
pub(crate) mod descriptor;
pub(crate) mod document;
pub(crate) mod entry;
pub(crate) mod merge;
pub(crate) mod store;
