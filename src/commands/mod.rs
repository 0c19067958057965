// Command modules
mod birthday;

// Re-export the `/anniv` command group
pub use birthday::anniv;
