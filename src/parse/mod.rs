//! Wire-format parsing: sender masks and full protocol lines.

pub mod line;
pub mod user;
