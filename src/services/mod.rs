/// Business logic, independent of Discord
pub mod birthday_service;
