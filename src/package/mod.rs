//! Plugin archive packaging and validation
//!
//! - **manifest**: fixed file/directory list resolved against the project
//! - **packager**: patch bump + archive creation (`legend-release pack`)
//! - **validator**: submission checks on an existing archive (`legend-release validate`)
//! - **check**: per-line check results shared by the validator output

pub mod check;
pub mod manifest;
pub mod packager;
pub mod validator;
