use serde::{Deserialize, Serialize};

use crate::naming;

pub const DEFAULT_ROOT_NAME: &str = "RootObject";

/// Options for one `convert` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Convert field keys to camelCase and type names to PascalCase.
    pub camel_case_key: bool,
    /// Name of the entry type.
    pub root_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camel_case_key: false,
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn camel_case(mut self, yes: bool) -> Self {
        self.camel_case_key = yes;
        self
    }

    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// `root_name` as a declarable identifier: kept when already valid,
    /// PascalCased when that makes it valid, `RootObject` otherwise.
    pub fn root_type_name(&self) -> String {
        if naming::is_identifier(&self.root_name) {
            return self.root_name.clone();
        }
        let pascal = naming::pascal_case(&self.root_name);
        if naming::is_identifier(&pascal) {
            pascal
        } else {
            DEFAULT_ROOT_NAME.to_string()
        }
    }
}
