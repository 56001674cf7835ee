//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "calens.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "calens.yaml";

/// Default changelog input directory
pub const DEFAULT_INPUT_DIR: &str = "changelog";

/// Default template file name, relative to the input directory
pub const DEFAULT_TEMPLATE_FILE: &str = "CHANGELOG.tmpl";

/// Default issue tracker host
pub const DEFAULT_TRACKER_HOST: &str = "github.com";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".calens.toml",
        ".calens.yaml",
    ]
}
