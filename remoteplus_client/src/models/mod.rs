pub mod query;
pub mod result_set;
pub mod security_result;
pub mod sentinel;
