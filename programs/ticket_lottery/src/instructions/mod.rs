pub mod admin;
pub mod entry;
pub mod lifecycle;
pub mod oracle;
