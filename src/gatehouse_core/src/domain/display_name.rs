use super::account::AccountError;

const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Public profile name shown next to posts and comments. Not a secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl TryFrom<String> for DisplayName {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(AccountError::InvalidDisplayName);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl DisplayName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let name = DisplayName::try_from("  Ada Lovelace ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn rejects_blank() {
        assert!(DisplayName::try_from("   ".to_string()).is_err());
    }

    #[test]
    fn rejects_overlong() {
        assert!(DisplayName::try_from("x".repeat(101)).is_err());
    }
}
