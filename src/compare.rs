use std::fmt;

use crate::allocation::AllocationTable;

/// An address present in both tables with different amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountMismatch {
    pub address: String,
    pub actual: u128,
    pub reference: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub decimals_match: bool,
    /// In the reference but not in the actual table.
    pub missing_addresses: Vec<String>,
    /// In the actual table but not in the reference.
    pub extra_addresses: Vec<String>,
    pub mismatched_amounts: Vec<AmountMismatch>,
}

impl ComparisonResult {
    pub fn is_success(&self) -> bool {
        self.decimals_match
            && self.missing_addresses.is_empty()
            && self.extra_addresses.is_empty()
            && self.mismatched_amounts.is_empty()
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Allocation table comparison:")?;
        writeln!(
            f,
            "  decimals: {}",
            if self.decimals_match { "match" } else { "differ" }
        )?;

        for addr in &self.missing_addresses {
            writeln!(f, "  missing  {}", addr)?;
        }
        for addr in &self.extra_addresses {
            writeln!(f, "  extra    {}", addr)?;
        }
        for mismatch in &self.mismatched_amounts {
            writeln!(
                f,
                "  amount   {}: {} (reference {})",
                mismatch.address, mismatch.actual, mismatch.reference
            )?;
        }

        if self.is_success() {
            writeln!(f, "  result: identical")
        } else {
            writeln!(f, "  result: DIFFERENT")
        }
    }
}

/// Address keys are compared exactly, so a case-only difference shows up as
/// one missing and one extra address.
pub fn compare(actual: &AllocationTable, reference: &AllocationTable) -> ComparisonResult {
    let missing_addresses = reference
        .airdrop
        .keys()
        .filter(|addr| !actual.contains(addr))
        .cloned()
        .collect();

    let extra_addresses = actual
        .airdrop
        .keys()
        .filter(|addr| !reference.contains(addr))
        .cloned()
        .collect();

    let mismatched_amounts = actual
        .iter()
        .filter_map(|(addr, amount)| match reference.amount(addr) {
            Some(other) if other != amount => Some(AmountMismatch {
                address: addr.to_string(),
                actual: amount,
                reference: other,
            }),
            _ => None,
        })
        .collect();

    ComparisonResult {
        decimals_match: actual.decimals == reference.decimals,
        missing_addresses,
        extra_addresses,
        mismatched_amounts,
    }
}
