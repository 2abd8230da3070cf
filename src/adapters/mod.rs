pub mod contact_log;
pub mod mail;
