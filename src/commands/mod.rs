pub mod catalog;
pub mod ensure;
pub mod list;
pub mod module;
