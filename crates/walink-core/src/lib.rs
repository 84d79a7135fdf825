pub mod error;
pub mod history;
pub mod link;
pub mod numerals;
pub mod phone;
