pub mod analyze;
pub mod init;
pub mod list_models;
pub mod validate;
