//! Player name validation

use regex::Regex;
use crate::config::NameRules;
use crate::error::{BoardError, BoardResult};

/// Validates display names offered at registration
#[derive(Debug, Clone)]
pub struct NameValidator {
    rules: NameRules,
    allowed: Option<Regex>,
}

impl NameValidator {
    pub fn new(rules: &NameRules) -> BoardResult<Self> {
        if rules.max_length == Some(0) {
            return Err(BoardError::Configuration {
                message: "Max name length must be greater than 0".to_string(),
                field: "names.max_length".to_string(),
            });
        }

        let allowed = rules
            .allowed_pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| BoardError::Configuration {
                    message: format!("Invalid allowed name pattern: {}", e),
                    field: "names.allowed_pattern".to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            rules: rules.clone(),
            allowed,
        })
    }

    /// Rules this validator was compiled from
    pub fn rules(&self) -> &NameRules {
        &self.rules
    }

    pub fn validate(&self, name: &str) -> BoardResult<()> {
        if name.trim().is_empty() {
            return Err(invalid(name, "name must not be empty"));
        }

        if let Some(max_length) = self.rules.max_length {
            let length = name.chars().count();
            if length > max_length {
                return Err(invalid(
                    name,
                    &format!("name is {} characters, limit is {}", length, max_length),
                ));
            }
        }

        if let Some(pattern) = &self.allowed {
            if !pattern.is_match(name) {
                return Err(invalid(name, "name does not match the allowed pattern"));
            }
        }

        Ok(())
    }
}

impl Default for NameValidator {
    fn default() -> Self {
        Self {
            rules: NameRules::default(),
            allowed: None,
        }
    }
}

fn invalid(name: &str, reason: &str) -> BoardError {
    BoardError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_accepts_ordinary_names() {
        let validator = NameValidator::default();
        assert!(validator.validate("SUHAIL").is_ok());
        assert!(validator.validate("Anne Marie").is_ok());
        assert!(validator.validate(&"x".repeat(200)).is_ok());
    }

    #[test]
    fn test_rejects_blank_names() {
        let validator = NameValidator::default();
        assert_eq!(validator.validate("").unwrap_err().kind(), ErrorKind::InvalidName);
        assert_eq!(validator.validate("   ").unwrap_err().kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn test_rejects_long_names() {
        let validator = NameValidator::new(&NameRules {
            max_length: Some(4),
            allowed_pattern: None,
        })
        .unwrap();

        assert!(validator.validate("Vika").is_ok());
        assert!(validator.validate("Vikas").is_err());
    }

    #[test]
    fn test_pattern_is_enforced() {
        let validator = NameValidator::new(&NameRules {
            max_length: Some(16),
            allowed_pattern: Some(r"^[A-Za-z]+$".to_string()),
        })
        .unwrap();

        assert!(validator.validate("Rajiv").is_ok());
        assert!(validator.validate("player5").is_err());
    }

    #[test]
    fn test_bad_rules_are_configuration_errors() {
        let zero = NameValidator::new(&NameRules {
            max_length: Some(0),
            allowed_pattern: None,
        });
        assert_eq!(zero.unwrap_err().kind(), ErrorKind::Configuration);

        let broken = NameValidator::new(&NameRules {
            max_length: Some(8),
            allowed_pattern: Some("([a-z".to_string()),
        });
        assert_eq!(broken.unwrap_err().kind(), ErrorKind::Configuration);
    }
}
