#![forbid(unsafe_code)]

use cicd_hello::greeter::{self, DEFAULT_NAME};

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
fn main() {
    println!("{}", greeter::hello(DEFAULT_NAME));
}
