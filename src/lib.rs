pub mod allocation;
pub mod codec;
pub mod compare;
pub mod error;

pub use allocation::{
    AllocationTable,
    DECIMALS,
    get_config
};
pub use codec::Format;
pub use compare::{AmountMismatch, ComparisonResult, compare};
pub use error::{ConfigError, ConfigResult};
