//! Page components

pub mod admin;
pub mod article_detail;
pub mod articles;
pub mod chat;
pub mod home;
pub mod projects;
