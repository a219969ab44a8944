// Manager-facing statistics and data export.

pub mod handlers;
