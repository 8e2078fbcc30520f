/// Immutable configuration for one merge run.
///
/// The target column list is fixed for the lifetime of a request; its order
/// defines the output column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Ordered schema every output row must contain.
    pub target_columns: Vec<String>,
    /// Worksheet read from each uploaded workbook.
    pub sheet_name: String,
    /// Informational description of the expected input filenames. Declared by
    /// the upstream process but never used to filter uploads; kept so the
    /// front-end can display it.
    pub file_pattern: String,
    /// Filename offered for the merged download.
    pub output_filename: String,
}

impl MergeConfig {
    /// Build a config with the given schema and the standard worksheet and
    /// filename settings.
    pub fn new<I, S>(target_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_columns: target_columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            target_columns: [
                "vendor_sku",
                "vendor_name",
                "Begin",
                "End",
                "Notes",
                "Flag: No Product Feed",
                "Qty",
                "Policy",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            sheet_name: "Worksheet".to_owned(),
            file_pattern: "*Inventory Update*.xlsx".to_owned(),
            output_filename: "Inventory_Merged.xlsx".to_owned(),
        }
    }
}
