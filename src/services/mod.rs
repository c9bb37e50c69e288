pub mod auth;
pub mod board;
pub mod cdp_board;
pub mod pagination;

pub use auth::{ensure_authenticated, AuthOutcome};
pub use board::JobBoard;
pub use cdp_board::CdpJobBoard;
pub use pagination::PaginationStrategy;
