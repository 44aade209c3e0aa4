//! Constants used throughout treeplate

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["treeplate.json", "treeplate.yaml", "treeplate.yml"];

/// Default source extension stripped from the last path segment to form `class`
pub const DEFAULT_SOURCE_EXTENSION: &str = ".java";

/// Delimiter between entries of the resource loader search path
pub const SEARCH_PATH_DELIMITER: &str = ", ";

/// Delimiter between the parent segments that form `package`
pub const PACKAGE_DELIMITER: &str = ".";

/// Log target used for diagnostics emitted by the template engine
pub const DEFAULT_ENGINE_LOG_TARGET: &str = "treeplate::engine";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Context keys derived from each input file. They always win over user values.
pub mod context_keys {
    pub const PROJECT: &str = "project";
    pub const PACKAGE: &str = "package";
    pub const CLASS: &str = "class";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
