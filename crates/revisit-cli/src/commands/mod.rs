pub mod init;
pub mod presets;
pub mod quiz;
pub mod validate;
