pub mod checkout;
pub mod passes;
