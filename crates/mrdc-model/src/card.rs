//! Card providers named in the card details document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A card provider with a known number format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardProvider {
    Visa16,
    Visa13,
    Visa19,
    Jcb16,
    Jcb15,
    DinersClub,
    AmericanExpress,
    Maestro,
    Discover,
    Mastercard,
}

impl CardProvider {
    pub const ALL: [CardProvider; 10] = [
        CardProvider::Visa16,
        CardProvider::Visa13,
        CardProvider::Visa19,
        CardProvider::Jcb16,
        CardProvider::Jcb15,
        CardProvider::DinersClub,
        CardProvider::AmericanExpress,
        CardProvider::Maestro,
        CardProvider::Discover,
        CardProvider::Mastercard,
    ];

    /// Label as it appears in the `card_provider` column.
    pub fn label(self) -> &'static str {
        match self {
            CardProvider::Visa16 => "VISA 16 digit",
            CardProvider::Visa13 => "VISA 13 digit",
            CardProvider::Visa19 => "VISA 19 digit",
            CardProvider::Jcb16 => "JCB 16 digit",
            CardProvider::Jcb15 => "JCB 15 digit",
            CardProvider::DinersClub => "Diners Club / Carte Blanche",
            CardProvider::AmericanExpress => "American Express",
            CardProvider::Maestro => "Maestro",
            CardProvider::Discover => "Discover",
            CardProvider::Mastercard => "Mastercard",
        }
    }

    /// Resolves a provider label, ignoring case and surrounding whitespace.
    ///
    /// A bare `VISA` resolves to the 16 digit format.
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("VISA") {
            return Some(CardProvider::Visa16);
        }
        Self::ALL
            .into_iter()
            .find(|provider| provider.label().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for CardProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
