use serde::{Deserialize, Serialize};

/// A selectable display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub name: String,
}

impl Currency {
    fn new(code: &str, symbol: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }
}

/// The currencies offered by the settings screen.
pub fn currency_catalog() -> Vec<Currency> {
    vec![
        Currency::new("USD", "$", "US Dollar"),
        Currency::new("EUR", "€", "Euro"),
        Currency::new("GBP", "£", "British Pound"),
        Currency::new("JPY", "¥", "Japanese Yen"),
        Currency::new("CAD", "C$", "Canadian Dollar"),
        Currency::new("AUD", "A$", "Australian Dollar"),
        Currency::new("CHF", "Fr", "Swiss Franc"),
        Currency::new("CNY", "¥", "Chinese Yuan"),
        Currency::new("INR", "₹", "Indian Rupee"),
        Currency::new("BRL", "R$", "Brazilian Real"),
        Currency::new("MXN", "$", "Mexican Peso"),
        Currency::new("KRW", "₩", "South Korean Won"),
    ]
}

/// Singleton user settings: display currency and monthly income goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: Currency,
    pub monthly_goal: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::new("USD", "$", "US Dollar"),
            monthly_goal: 5000.0,
        }
    }
}
