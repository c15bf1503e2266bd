pub mod session;
pub mod turn;
