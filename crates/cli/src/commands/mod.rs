mod check;
mod fields;

pub(crate) use check::cmd_check;
pub(crate) use fields::cmd_fields;
