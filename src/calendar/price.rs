use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPrice {
    pub sessions: u32,
    pub amount: String,
}

/// Treatment pricing as listed in the catalog.
///
/// Deserializes from the loose shapes the catalog stores: a string is a flat
/// price, a list is per-session pricing and `null` means price on request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Flat(String),
    PerSession(Vec<SessionPrice>),
    #[default]
    OnRequest,
}

impl Price {
    pub fn label(&self) -> String {
        match self {
            Price::Flat(amount) => amount.clone(),
            Price::PerSession(tiers) if tiers.is_empty() => "Price on request".to_string(),
            Price::PerSession(tiers) => tiers
                .iter()
                .map(|tier| {
                    let unit = if tier.sessions == 1 { "session" } else { "sessions" };
                    format!("{} {}: {}", tier.sessions, unit, tier.amount)
                })
                .collect::<Vec<_>>()
                .join(", "),
            Price::OnRequest => "Price on request".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub name: String,
    #[serde(default)]
    pub price: Price,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_price_is_flat() {
        let treatment: Treatment =
            serde_json::from_str(r#"{"name": "Hydrafacial", "price": "$250"}"#).unwrap();
        assert_eq!(treatment.price, Price::Flat("$250".to_string()));
        assert_eq!(treatment.price.label(), "$250");
    }

    #[test]
    fn list_price_is_per_session() {
        let json = r#"{
            "name": "Laser hair removal",
            "price": [
                {"sessions": 1, "amount": "$120"},
                {"sessions": 6, "amount": "$600"}
            ]
        }"#;
        let treatment: Treatment = serde_json::from_str(json).unwrap();
        assert!(matches!(treatment.price, Price::PerSession(ref tiers) if tiers.len() == 2));
        assert_eq!(treatment.price.label(), "1 session: $120, 6 sessions: $600");
    }

    #[test]
    fn null_or_missing_price_is_on_request() {
        let null: Treatment =
            serde_json::from_str(r#"{"name": "Thread lift", "price": null}"#).unwrap();
        let missing: Treatment = serde_json::from_str(r#"{"name": "Thread lift"}"#).unwrap();
        assert_eq!(null.price, Price::OnRequest);
        assert_eq!(missing.price, Price::OnRequest);
        assert_eq!(missing.price.label(), "Price on request");
    }
}
