/// Configuration options for component analysis
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Maximum depth for structural type resolution; subtrees below it are
    /// reported as max-depth markers
    pub max_depth: usize,

    /// Module specifier the ref-forwarding wrapper must be imported from
    pub ui_module: String,

    /// Identifier of the ref-forwarding wrapper
    pub wrapper_ident: String,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            ui_module: "react".to_string(),
            wrapper_ident: "forwardRef".to_string(),
        }
    }
}

impl AnalyzeOptions {
    /// Options with a custom resolution depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Options for a UI library living under a different module specifier
    pub fn for_module(ui_module: impl Into<String>) -> Self {
        Self {
            ui_module: ui_module.into(),
            ..Default::default()
        }
    }
}
