//! Built-in option set for the identity server.

use crate::error::Result;
use crate::schema::option::{OptionKind, OptionSpec};
use crate::schema::registry::OptionSchema;

/// Default file name of the paste deployment descriptor.
pub const DEFAULT_PASTE_CONFIG: &str = "strata-paste.ini";

/// The options a stock server deployment declares.
///
/// `[sql]` options moved to `[database]`; both the group-renamed and the
/// older `[DEFAULT] sql_*` spellings are still accepted.
///
/// # Errors
///
/// Never fails for the built-in declarations; the `Result` comes from the
/// registry's conflict checks.
pub fn server_schema() -> Result<OptionSchema> {
    OptionSchema::from_specs([
        OptionSpec::new("DEFAULT", "debug")
            .kind(OptionKind::Boolean)
            .default_value("false")
            .help("Log at debug level instead of the default warning level."),
        OptionSpec::new("DEFAULT", "max_param_size")
            .kind(OptionKind::Integer)
            .default_value("64")
            .help("Limit the sizes of user & project ID/names."),
        OptionSpec::new("DEFAULT", "public_endpoint")
            .help("Base public endpoint URL advertised to clients."),
        OptionSpec::new("auth", "password")
            .help("Password of the authenticating service user. No default."),
        OptionSpec::new("auth", "token")
            .help("Bootstrap token accepted before any user exists. No default."),
        OptionSpec::new("database", "connection")
            .help("SQLAlchemy-style connection string for the backing database.")
            .deprecated_name("sql", "connection")
            .deprecated_name("DEFAULT", "sql_connection"),
        OptionSpec::new("database", "idle_timeout")
            .kind(OptionKind::Integer)
            .default_value("3600")
            .help("Seconds a pooled connection may stay idle before it is recycled.")
            .deprecated_name("sql", "idle_timeout")
            .deprecated_name("DEFAULT", "sql_idle_timeout"),
        OptionSpec::new("paste_deploy", "config_file")
            .default_value(DEFAULT_PASTE_CONFIG)
            .help("Name of the paste configuration file that defines the WSGI pipeline."),
        OptionSpec::new("profiler", "enabled")
            .kind(OptionKind::Boolean)
            .default_value("false")
            .help("Enable request profiling."),
        OptionSpec::new("profiler", "hmac_keys")
            .kind(OptionKind::List)
            .help("Keys used to sign profiling traces."),
    ])
}
