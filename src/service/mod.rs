pub mod error;
pub mod negotiation_service;
pub mod notification_service;
