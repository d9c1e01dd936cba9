#![allow(dead_code)]

pub mod console_env;
pub mod stub_server;
