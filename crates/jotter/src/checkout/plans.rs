//! The subscription plan catalogue.

use std::fmt;

use serde::{Serialize, Serializer};

/// Id of the plan preselected on a fresh checkout.
pub const DEFAULT_PLAN_ID: &str = "pro";

/// A currency amount held as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u32);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// A price of `cents` hundredths.
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> u32 {
        self.0
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A subscription tier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Price per billing interval.
    pub price: Price,
    /// Billing period label.
    pub interval: &'static str,
    /// Feature list, in display order.
    pub features: &'static [&'static str],
    /// Highlighted as the recommended choice.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub popular: bool,
}

/// Every plan on offer.
pub static PLANS: [Plan; 3] = [
    Plan {
        id: "basic",
        name: "Basic",
        price: Price::from_cents(999),
        interval: "month",
        features: &[
            "Unlimited notes",
            "Markdown support",
            "Search functionality",
            "Basic support",
        ],
        popular: false,
    },
    Plan {
        id: "pro",
        name: "Pro",
        price: Price::from_cents(1999),
        interval: "month",
        features: &[
            "Everything in Basic",
            "Advanced search",
            "Tags & organization",
            "Export to PDF",
            "Priority support",
            "Collaboration features",
        ],
        popular: true,
    },
    Plan {
        id: "enterprise",
        name: "Enterprise",
        price: Price::from_cents(4999),
        interval: "month",
        features: &[
            "Everything in Pro",
            "Team management",
            "SSO integration",
            "Advanced analytics",
            "Custom integrations",
            "Dedicated support",
        ],
        popular: false,
    },
];

/// Look up a plan by id.
#[must_use]
pub fn find_plan(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!(Price::from_cents(4900).to_string(), "49.00");
    }

    #[test]
    fn test_price_add() {
        assert_eq!(Price::from_cents(999) + Price::ZERO, Price::from_cents(999));
    }

    #[test]
    fn test_default_plan_exists() {
        let plan = find_plan(DEFAULT_PLAN_ID).unwrap();
        assert_eq!(plan.name, "Pro");
        assert!(plan.popular);
    }

    #[test]
    fn test_find_unknown_plan() {
        assert!(find_plan("platinum").is_none());
    }

    #[test]
    fn test_plan_ids_unique() {
        let mut ids: Vec<_> = PLANS.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), PLANS.len());
    }

    #[test]
    fn test_only_one_popular_plan() {
        assert_eq!(PLANS.iter().filter(|p| p.popular).count(), 1);
    }

    #[test]
    fn test_plan_serializes_price_as_decimal() {
        let json = serde_json::to_value(find_plan("basic").unwrap()).unwrap();
        assert_eq!(json["price"], "9.99");
        assert_eq!(json["features"][0], "Unlimited notes");
        assert!(json.get("popular").is_none());
    }
}
