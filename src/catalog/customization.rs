//! Customization (clothing) records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_parent", default)]
    pub parent: String,
    #[serde(rename = "_type", default)]
    pub record_type: String,
    #[serde(rename = "_props", default)]
    pub props: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomizationRecord {
    /// Set `_props.Prefab.path`, creating the prefab object if needed
    pub fn set_prefab_path(&mut self, path: &str) {
        let prefab = self
            .props
            .entry("Prefab")
            .or_insert_with(|| Value::Object(Map::new()));
        if !prefab.is_object() {
            *prefab = Value::Object(Map::new());
        }
        if let Value::Object(prefab) = prefab {
            prefab.insert("path".into(), Value::String(path.to_string()));
        }
    }

    pub fn set_prop(&mut self, key: &str, value: Value) {
        self.props.insert(key.to_string(), value);
    }
}
