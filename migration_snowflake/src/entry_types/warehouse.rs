use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};

use crate::identifier::AccountObjectIdentifier;

/// Warehouse sizes, spelled the way the provider accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarehouseSize {
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XXLarge,
    XXXLarge,
    X4Large,
    X5Large,
    X6Large,
}

impl WarehouseSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseSize::XSmall => "XSMALL",
            WarehouseSize::Small => "SMALL",
            WarehouseSize::Medium => "MEDIUM",
            WarehouseSize::Large => "LARGE",
            WarehouseSize::XLarge => "XLARGE",
            WarehouseSize::XXLarge => "XXLARGE",
            WarehouseSize::XXXLarge => "XXXLARGE",
            WarehouseSize::X4Large => "X4LARGE",
            WarehouseSize::X5Large => "X5LARGE",
            WarehouseSize::X6Large => "X6LARGE",
        }
    }
}

impl Display for WarehouseSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WarehouseSize {
    type Err = anyhow::Error;

    /// `SHOW WAREHOUSES` prints sizes like `X-Small` or `2X-Large`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect();
        Ok(match normalized.as_str() {
            "XSMALL" => WarehouseSize::XSmall,
            "SMALL" => WarehouseSize::Small,
            "MEDIUM" => WarehouseSize::Medium,
            "LARGE" => WarehouseSize::Large,
            "XLARGE" => WarehouseSize::XLarge,
            "XXLARGE" | "2XLARGE" => WarehouseSize::XXLarge,
            "XXXLARGE" | "3XLARGE" => WarehouseSize::XXXLarge,
            "X4LARGE" | "4XLARGE" => WarehouseSize::X4Large,
            "X5LARGE" | "5XLARGE" => WarehouseSize::X5Large,
            "X6LARGE" | "6XLARGE" => WarehouseSize::X6Large,
            _ => return Err(anyhow!("unknown warehouse size: {s:?}")),
        })
    }
}

/// Snowflake Warehouse entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warehouse {
    /// The warehouse name in Snowflake.
    pub name: String,
    pub state: String,
    pub warehouse_type: String,
    pub size: WarehouseSize,
    pub min_cluster_count: i64,
    pub max_cluster_count: i64,
    pub auto_suspend: i64,
    pub auto_resume: bool,
    pub comment: String,
    pub enable_query_acceleration: bool,
    pub query_acceleration_max_scale_factor: i64,
    pub resource_monitor: String,
    pub scaling_policy: String,
    pub owner: String,
    pub owner_role_type: String,
    pub resource_constraint: String,
}

impl Warehouse {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    /// `SHOW WAREHOUSES` prints `null` when no monitor is attached.
    pub fn resource_monitor(&self) -> Option<&str> {
        match self.resource_monitor.as_str() {
            "" => None,
            m if m.eq_ignore_ascii_case("null") => None,
            m => Some(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn parses_show_output_sizes() -> Result<()> {
        assert_eq!("X-Small".parse::<WarehouseSize>()?, WarehouseSize::XSmall);
        assert_eq!("Medium".parse::<WarehouseSize>()?, WarehouseSize::Medium);
        assert_eq!("2X-Large".parse::<WarehouseSize>()?, WarehouseSize::XXLarge);
        assert_eq!("6X-Large".parse::<WarehouseSize>()?, WarehouseSize::X6Large);
        assert_eq!("XXXLARGE".parse::<WarehouseSize>()?, WarehouseSize::XXXLarge);
        assert!("Huge".parse::<WarehouseSize>().is_err());
        Ok(())
    }
}
