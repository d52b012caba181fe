pub mod esios;
pub mod retry;
