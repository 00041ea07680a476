pub mod categories;
pub mod common;
pub mod memos;
