//! Card number formats per provider.

use std::collections::HashMap;
use std::sync::LazyLock;

use mrdc_model::CardProvider;
use regex::Regex;

/// Outcome of checking one card number against its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardCheck {
    Accepted(CardProvider),
    /// The number does not match the provider's format.
    Mismatch(CardProvider),
    /// The provider label is not one of the known providers.
    UnknownProvider,
    /// The row has no card number.
    MissingNumber,
}

impl CardCheck {
    pub fn is_accepted(self) -> bool {
        matches!(self, CardCheck::Accepted(_))
    }
}

/// Regular expression source for a provider's card numbers.
pub fn pattern_source(provider: CardProvider) -> &'static str {
    match provider {
        CardProvider::Visa16 => r"^4[0-9]{15}$",
        CardProvider::Visa13 => r"^4[0-9]{12}(?:[0-9]{3})?$",
        CardProvider::Visa19 => r"^4[0-9]{18}$",
        CardProvider::Jcb16 => r"^(?:2131|1800|35\d{3})\d{11}$",
        CardProvider::Jcb15 => r"^(?:2131|1800|35\d{3})\d{10}$",
        CardProvider::DinersClub => r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$",
        CardProvider::AmericanExpress => r"^3[47][0-9]{13}$",
        CardProvider::Maestro => r"^(?:5[0678]\d\d|6304|6390|67\d\d)\d{8,15}$",
        CardProvider::Discover => r"^6(?:011|5[0-9]{2})[0-9]{12}$",
        CardProvider::Mastercard => r"^5[1-5][0-9]{14}$",
    }
}

static CARD_PATTERNS: LazyLock<HashMap<CardProvider, Regex>> = LazyLock::new(|| {
    CardProvider::ALL
        .into_iter()
        .filter_map(|provider| {
            Regex::new(pattern_source(provider))
                .ok()
                .map(|regex| (provider, regex))
        })
        .collect()
});

/// Compiled pattern for a provider.
pub fn card_pattern(provider: CardProvider) -> Option<&'static Regex> {
    CARD_PATTERNS.get(&provider)
}

/// Checks a card number against the format of the named provider.
pub fn check_card(number: Option<&str>, provider_label: Option<&str>) -> CardCheck {
    let Some(provider) = provider_label.and_then(CardProvider::from_label) else {
        return CardCheck::UnknownProvider;
    };
    let Some(number) = number.map(str::trim).filter(|n| !n.is_empty()) else {
        return CardCheck::MissingNumber;
    };
    match card_pattern(provider) {
        Some(pattern) if pattern.is_match(number) => CardCheck::Accepted(provider),
        _ => CardCheck::Mismatch(provider),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_a_compiled_pattern() {
        for provider in CardProvider::ALL {
            assert!(card_pattern(provider).is_some(), "{provider}");
        }
    }

    #[test]
    fn visa_alias() {
        assert_eq!(
            check_card(Some("4111111111111111"), Some("VISA")),
            CardCheck::Accepted(CardProvider::Visa16)
        );
        assert_eq!(
            check_card(Some("1234567890123456"), Some("VISA")),
            CardCheck::Mismatch(CardProvider::Visa16)
        );
    }

    #[test]
    fn rejection_outcomes() {
        assert_eq!(
            check_card(Some("4111111111111111"), Some("NULL")),
            CardCheck::UnknownProvider
        );
        assert_eq!(check_card(Some("4111111111111111"), None), CardCheck::UnknownProvider);
        assert_eq!(
            check_card(None, Some("Mastercard")),
            CardCheck::MissingNumber
        );
    }

    #[test]
    fn provider_formats() {
        assert!(check_card(Some("378282246310005"), Some("American Express")).is_accepted());
        assert!(check_card(Some("30569309025904"), Some("Diners Club / Carte Blanche")).is_accepted());
        assert!(check_card(Some("6011111111111117"), Some("Discover")).is_accepted());
        assert!(check_card(Some("5555555555554444"), Some("Mastercard")).is_accepted());
        assert!(check_card(Some("3530111333300000"), Some("JCB 16 digit")).is_accepted());
        assert!(check_card(Some("352800000000000"), Some("JCB 15 digit")).is_accepted());
        assert!(check_card(Some("4222222222222"), Some("VISA 13 digit")).is_accepted());
        assert!(check_card(Some("4000000000000000006"), Some("VISA 19 digit")).is_accepted());
        assert!(check_card(Some("6304000000000000"), Some("Maestro")).is_accepted());
        assert!(!check_card(Some("411111111111111"), Some("VISA 16 digit")).is_accepted());
    }
}
