//! Model cost tiers

use serde::{Deserialize, Serialize};

/// Cost/quality tier of the upstream LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Cheap,
    Expensive,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheap => "cheap",
            Self::Expensive => "expensive",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_display() {
        assert_eq!(ModelTier::Cheap.to_string(), "cheap");
        assert_eq!(ModelTier::Expensive.to_string(), "expensive");
    }

    #[test]
    fn test_tier_serde_roundtrip() {
        let json = serde_json::to_string(&ModelTier::Expensive).unwrap();
        assert_eq!(json, r#""expensive""#);

        let tier: ModelTier = serde_json::from_str(&json).unwrap();
        assert_eq!(tier, ModelTier::Expensive);
    }
}
