//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod pagination;
pub mod renewal;
pub mod user;

