use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::ReflectConfig;

/// JSON schema for the TOML configuration, for editor tooling.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(ReflectConfig)
}
