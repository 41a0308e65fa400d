#![forbid(unsafe_code)]

//! Greeting utility shared by the `hello` command line program and the
//! `hello_server` http service.

pub mod greeter;
pub mod utils;
pub mod v1;
