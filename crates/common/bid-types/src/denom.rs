use serde::{Serialize, Serializer};
use std::fmt;

/// Native micro-token denomination.
pub const NATIVE_DENOM: &str = "uakt";

/// IBC denominations of the USD-pegged stablecoins accepted for settlement.
pub const STABLE_DENOMS: [&str; 2] = [
    "ibc/12C6A0C374171B595A0A9E18B83FA09D295FB1F2D8C6DAA3AC28683471752D84",
    "ibc/170C677610AC31DF0904FFE09CD3B5C657492170E7E52372E48756B71E56F2F1",
];

/// The currency a bid is quoted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettlementDenom {
    Native,
    Stable(String),
    Unsupported(String),
}

impl SettlementDenom {
    pub fn parse(denom: &str) -> Self {
        if denom == NATIVE_DENOM {
            SettlementDenom::Native
        } else if STABLE_DENOMS.contains(&denom) {
            SettlementDenom::Stable(denom.to_string())
        } else {
            SettlementDenom::Unsupported(denom.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SettlementDenom::Native => NATIVE_DENOM,
            SettlementDenom::Stable(d) | SettlementDenom::Unsupported(d) => d,
        }
    }
}

impl From<&str> for SettlementDenom {
    fn from(denom: &str) -> Self {
        Self::parse(denom)
    }
}

impl Serialize for SettlementDenom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for SettlementDenom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_denoms() {
        assert_eq!(SettlementDenom::parse("uakt"), SettlementDenom::Native);
        for d in STABLE_DENOMS {
            assert_eq!(SettlementDenom::parse(d), SettlementDenom::Stable(d.to_string()));
        }
    }

    #[test]
    fn anything_else_is_unsupported() {
        let denom = SettlementDenom::from("akt");
        assert_eq!(denom, SettlementDenom::Unsupported("akt".to_string()));
        assert_eq!(denom.to_string(), "akt");
        assert!(matches!(SettlementDenom::parse(""), SettlementDenom::Unsupported(_)));
    }

    #[test]
    fn serializes_as_wire_string() {
        assert_eq!(serde_json::to_string(&SettlementDenom::Native).unwrap(), "\"uakt\"");
        let stable = SettlementDenom::parse(STABLE_DENOMS[0]);
        assert_eq!(serde_json::to_value(&stable).unwrap(), STABLE_DENOMS[0]);
    }
}
