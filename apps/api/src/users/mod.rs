// Administration of platform users (employees and managers).

pub mod handlers;
