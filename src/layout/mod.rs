pub(crate) mod char;
pub(crate) mod style;
pub(crate) mod text;
pub(crate) mod wrap;
