//! Functions every program can use without defining them.
//!
//! The prelude is ordinary source, parsed ahead of the user's file. A user
//! definition with the same name replaces the prelude's.

pub const PRELUDE: &str = include_str!("prelude.at");
