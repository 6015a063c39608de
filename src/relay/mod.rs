pub mod engine;
pub mod event;
pub mod topic;

pub use engine::Relay;
pub use event::ServerEvent;
