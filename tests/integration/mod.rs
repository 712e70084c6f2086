//! Integration tests for legend-release

mod helpers;

mod test_i18n;
mod test_pack;
mod test_validate;
mod test_version;
