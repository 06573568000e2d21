use serde::Serialize;

use crate::core::models::token::TokenAmount;

/// Native token payments wallet. A user without a wallet is represented by
/// the default instance, which has an empty address.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wallet {
    pub address: String,
    pub balance: TokenAmount,
}

impl Wallet {
    pub fn is_claimed(&self) -> bool {
        !self.address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wallet_is_unclaimed() {
        let wallet = Wallet::default();
        assert!(!wallet.is_claimed());
        assert_eq!(wallet.balance, TokenAmount::default());
    }

    #[test]
    fn wallet_with_address_is_claimed() {
        let wallet = Wallet {
            address: "0xabc".to_string(),
            balance: TokenAmount::new("3.2", "STORX"),
        };
        assert!(wallet.is_claimed());
    }
}
