use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub brand: String,
    pub last4: String,
    pub is_default: bool,
    /// UI selection state; never sent to or received from the backend
    #[serde(skip)]
    pub is_selected: bool,
}

impl CreditCard {
    /// Expiry as "MM/YYYY".
    pub fn expiry(&self) -> String {
        format!("{:02}/{}", self.exp_month, self.exp_year)
    }
}

impl Default for CreditCard {
    fn default() -> Self {
        Self {
            id: String::new(),
            exp_month: 0,
            exp_year: 0,
            brand: String::new(),
            last4: "0000".to_string(),
            is_default: false,
            is_selected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_card_masks_digits() {
        let card = CreditCard::default();
        assert_eq!(card.last4, "0000");
        assert!(!card.is_default);
        assert!(!card.is_selected);
    }

    #[test]
    fn expiry_pads_month() {
        let card = CreditCard {
            exp_month: 3,
            exp_year: 2027,
            ..Default::default()
        };
        assert_eq!(card.expiry(), "03/2027");
    }

    #[test]
    fn selection_flag_is_not_serialized() {
        let card = CreditCard {
            is_selected: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("isSelected").is_none());
        assert_eq!(json["last4"], "0000");
    }
}
