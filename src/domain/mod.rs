pub mod key;
pub mod link;
pub mod track;
