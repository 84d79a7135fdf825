use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::phone::SaudiMobile;

pub const LINK_PREFIX: &str = "https://wa.me/";

/// Canonical WhatsApp chat link, `https://wa.me/<digits>`.
///
/// Equality is plain string equality; history uses it as the de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsAppLink(String);

impl WhatsAppLink {
    pub fn for_mobile(mobile: &SaudiMobile) -> Self {
        Self(format!("{LINK_PREFIX}{}", mobile.as_str()))
    }

    /// Accepts any text carrying the link prefix. Used when rehydrating
    /// stored history, where only the shape is checked.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if !s.starts_with(LINK_PREFIX) {
            return Err(DomainError::InvalidLink(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// The part after the last `/`.
    pub fn phone_number(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WhatsAppLink {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WhatsAppLink> for String {
    fn from(value: WhatsAppLink) -> Self {
        value.0
    }
}

impl fmt::Display for WhatsAppLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_for_mobile_uses_canonical_prefix() {
        let mobile = SaudiMobile::parse("966559948149").unwrap();
        let link = WhatsAppLink::for_mobile(&mobile);
        assert_eq!(link.as_str(), "https://wa.me/966559948149");
    }

    #[test]
    fn phone_number_round_trips_through_link() {
        for number in ["966512345678", "966500000000", "966599999999"] {
            let mobile = SaudiMobile::parse(number).unwrap();
            let link = WhatsAppLink::for_mobile(&mobile);
            assert_eq!(link.phone_number(), number);
        }
    }

    #[test]
    fn parse_checks_prefix_only() {
        assert!(WhatsAppLink::parse("https://wa.me/966512345678").is_ok());
        assert!(WhatsAppLink::parse("https://wa.me/anything").is_ok());
        assert_eq!(
            WhatsAppLink::parse("not-a-link"),
            Err(DomainError::InvalidLink("not-a-link".into()))
        );
        assert!(WhatsAppLink::parse("http://wa.me/966512345678").is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let link = WhatsAppLink::parse("https://wa.me/966512345678").unwrap();
        assert_eq!(
            serde_json::to_string(&link).unwrap(),
            "\"https://wa.me/966512345678\""
        );
    }
}
