//! Public-facing rendering of an account.

use {
    crate::models::Account,
    rust_decimal::Decimal,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Field names are part of the wire format and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementView {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Account Number")]
    pub number: String,
    #[serde(rename = "Balance", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl StatementView {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&Account> for StatementView {
    fn from(account: &Account) -> Self {
        let address = Some(account.customer.address.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        StatementView {
            name: account.customer.name.clone(),
            address,
            phone: account.customer.phone.clone(),
            number: account.number.clone(),
            balance: account.balance.to_decimal(),
        }
    }
}

/// One-line summary: `number - name - balance`.
impl fmt::Display for StatementView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.number, self.name, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::models::{Customer, Money},
        serde_json::Value,
    };

    fn account() -> Account {
        Account::new(
            Customer {
                name: "Samuel".to_string(),
                address: "3 Thorborn Avenue, Sabo, Yaba, Lagos".to_string(),
                phone: "(234) 803 395 4301".to_string(),
                ..Default::default()
            },
            "0011001001".to_string(),
        )
        .with_balance(Money::from_minor_units(10_050))
    }

    #[test]
    fn test_statement_json_fields() {
        let json = StatementView::from(&account()).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["Name"], "Samuel");
        assert_eq!(value["Address"], "3 Thorborn Avenue, Sabo, Yaba, Lagos");
        assert_eq!(value["Phone"], "(234) 803 395 4301");
        assert_eq!(value["Account Number"], "0011001001");
        assert_eq!(value["Balance"].as_f64(), Some(100.5));
    }

    #[test]
    fn test_empty_address_is_omitted() {
        let mut acc = account();
        acc.customer.address = String::new();

        let json = StatementView::from(&acc).to_json().unwrap();

        assert!(!json.contains("Address"));
    }

    #[test]
    fn test_summary_line() {
        let view = StatementView::from(&account());

        assert_eq!(view.to_string(), "0011001001 - Samuel - 100.50");
    }

    #[test]
    fn test_statement_reads_back() {
        let view = StatementView::from(&account());
        let parsed: StatementView = serde_json::from_str(&view.to_json().unwrap()).unwrap();

        assert_eq!(parsed.number, view.number);
        assert_eq!(parsed.address, view.address);
    }
}
