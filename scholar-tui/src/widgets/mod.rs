//! Reusable widget components.

pub mod detail;
pub mod input;
pub mod pagination;
pub mod progress;
pub mod status;

pub use detail::DetailPanel;
pub use input::TextField;
pub use pagination::PaginationBar;
pub use progress::ConfidenceGauge;
pub use status::StatusIndicator;
