//! The airdrop allocation table shipped with this crate.
//!
//! The table is a compile-time literal. It is materialised once, on first
//! access, and handed out by shared reference afterwards.

use once_cell::sync::Lazy;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Precision scale for the amounts below. Informational only: nothing in
/// this crate multiplies or divides by `10^DECIMALS`.
pub const DECIMALS: u8 = 18;

/// Address -> amount pairs as produced by the allocation generator.
const AIRDROP: [(&str, u128); 3] = [
    ("0xDED270233f774c902Bb77CB8A1e2960D33601B69", 723),
    ("0xCdaa67F8864C90A6782Dff65D38aD368cF0f496F", 124),
    ("0xcB1C0F185FFF32f43B9A292e9cbCd0Bc34e0c95C", 35),
];

static CONFIG: Lazy<AllocationTable> = Lazy::new(|| AllocationTable {
    decimals: DECIMALS,
    airdrop: AIRDROP
        .iter()
        .map(|(address, amount)| (address.to_string(), *amount))
        .collect(),
});

/// Returns the built-in allocation table.
///
/// Every call yields the same reference; the value never changes.
pub fn get_config() -> &'static AllocationTable {
    &CONFIG
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationTable {
    pub decimals: u8,
    /// Keys are matched exactly; `0xAb..` and `0xab..` are different entries.
    #[serde(deserialize_with = "deserialize_airdrop")]
    pub airdrop: BTreeMap<String, u128>,
}

/// Like the derived map impl, but a repeated address is an error rather than
/// a silent overwrite.
fn deserialize_airdrop<'de, D>(deserializer: D) -> Result<BTreeMap<String, u128>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AirdropVisitor;

    impl<'de> Visitor<'de> for AirdropVisitor {
        type Value = BTreeMap<String, u128>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of address to amount")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut airdrop = BTreeMap::new();
            while let Some((address, amount)) = access.next_entry::<String, u128>()? {
                if airdrop.contains_key(&address) {
                    return Err(de::Error::custom(format!("duplicate address: {}", address)));
                }
                airdrop.insert(address, amount);
            }
            Ok(airdrop)
        }
    }

    deserializer.deserialize_map(AirdropVisitor)
}

impl AllocationTable {
    pub fn new(decimals: u8, airdrop: BTreeMap<String, u128>) -> Self {
        Self { decimals, airdrop }
    }

    pub fn amount(&self, address: &str) -> Option<u128> {
        self.airdrop.get(address).copied()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.airdrop.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.airdrop.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airdrop.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u128)> + '_ {
        self.airdrop
            .iter()
            .map(|(address, amount)| (address.as_str(), *amount))
    }
}
