pub mod ddb;
pub mod logs;
