//! Form identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a catalog object. The high byte is the load-order index
/// of the plugin that defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormId(pub u32);

impl FormId {
    /// Load-order index of the defining plugin
    pub fn mod_index(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Failure to parse a hex form id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid form id '{0}'")]
pub struct FormIdError(pub String);

impl FromStr for FormId {
    type Err = FormIdError;

    /// Accepts `00012EB7`, `0x00012EB7` and `12eb7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 8 {
            return Err(FormIdError(s.to_string()));
        }

        u32::from_str_radix(digits, 16)
            .map(FormId)
            .map_err(|_| FormIdError(s.to_string()))
    }
}

impl TryFrom<String> for FormId {
    type Error = FormIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FormId> for String {
    fn from(id: FormId) -> Self {
        id.to_string()
    }
}

impl From<u32> for FormId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("00012EB7".parse(), Ok(FormId(0x12EB7)));
        assert_eq!("0x00012eb7".parse(), Ok(FormId(0x12EB7)));
        assert_eq!("7".parse(), Ok(FormId(7)));
        assert!("".parse::<FormId>().is_err());
        assert!("0x".parse::<FormId>().is_err());
        assert!("123456789".parse::<FormId>().is_err());
        assert!("zz".parse::<FormId>().is_err());
    }

    #[test]
    fn test_display_and_mod_index() {
        let id = FormId(0x0201_2EB7);
        assert_eq!(id.to_string(), "02012EB7");
        assert_eq!(id.mod_index(), 2);
        assert_eq!(String::from(FormId(7)), "00000007");
    }

    #[test]
    fn test_serde_as_string() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Wrapper {
            id: FormId,
        }

        let text = toml::to_string(&Wrapper { id: FormId(0x3EADE) }).unwrap();
        assert_eq!(text.trim(), "id = \"0003EADE\"");
        let back: Wrapper = toml::from_str("id = \"0x3eade\"").unwrap();
        assert_eq!(back.id, FormId(0x3EADE));
        assert!(toml::from_str::<Wrapper>("id = \"pony\"").is_err());
    }
}
