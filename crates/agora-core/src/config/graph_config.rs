use serde::{Deserialize, Serialize};

/// How transitive closures over the idea graph are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureStrategy {
    /// The store's recursive query. Single-root ancestors only.
    #[default]
    Native,
    /// Iterative frontier expansion until no growth. Supports multi-root seeds.
    FixedPoint,
}

impl ClosureStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::FixedPoint => "fixed_point",
        }
    }

    pub fn from_str_name(name: &str) -> Option<Self> {
        match name {
            "native" => Some(Self::Native),
            "fixed_point" => Some(Self::FixedPoint),
            _ => None,
        }
    }
}

/// Graph resolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub closure_strategy: ClosureStrategy,
}
