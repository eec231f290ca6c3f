// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod dynamodb_setup;
pub use dynamodb_setup::*;
mod test_setup;
pub use test_setup::*;
