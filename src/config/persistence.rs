//! Dataset location configuration

/// Where the price table lives when no `--data` flag is given.
pub struct DataSourceConfig {
    /// Default CSV path, relative to the working directory
    pub default_path: &'static str,
    /// Display name given to a dataset loaded from disk
    pub dataset_name: &'static str,
}

pub const DATA: DataSourceConfig = DataSourceConfig {
    default_path: "data/food_prices.csv",
    dataset_name: "Food Prices",
};
