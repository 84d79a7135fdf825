pub mod normalize;
pub mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub use normalize::{has_only_phone_characters, normalize};
pub use validation::{validate, InvalidNumber};

/// Country code for Saudi Arabia.
pub const SAUDI_COUNTRY_CODE: &str = "966";

/// Saudi mobile number in canonical form: `9665` followed by eight digits.
///
/// The only way to obtain one is through [`SaudiMobile::parse`], so holding a
/// value means it passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SaudiMobile(String);

impl SaudiMobile {
    pub fn parse(normalized: &str) -> Result<Self, DomainError> {
        validate(normalized).map_err(DomainError::InvalidSaudiNumber)?;
        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SaudiMobile {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SaudiMobile> for String {
    fn from(value: SaudiMobile) -> Self {
        value.0
    }
}

impl fmt::Display for SaudiMobile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
