pub mod handlers;
pub mod session;
pub mod validators;
pub mod wizard;
