pub mod message;
pub mod notification;
pub mod project;
pub mod user;
