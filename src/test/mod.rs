pub(crate) mod multipoint;
pub(crate) mod point;
