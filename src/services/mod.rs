pub mod checkout_service;
pub mod pass_service;
