pub mod balance;
pub mod cards;
pub mod coupon;
pub mod history;
pub mod token;
pub mod usage;
pub mod wallet;
