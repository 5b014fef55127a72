pub mod hook;
pub mod rewrite;
