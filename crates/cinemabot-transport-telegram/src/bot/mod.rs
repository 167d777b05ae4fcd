/// Command, message and callback handlers
pub mod handlers;
/// Sending detail and list views
pub mod messaging;
/// Delayed searches started by `/schedule`
pub mod scheduler;
/// Resilient messaging with automatic retry for Telegram API operations
pub mod resilient;
/// View layer for UI components (keyboards, messages)
pub mod views;
