use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};
use std::{fs, path::Path};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` with object keys sorted at every level.
pub fn jsonify<T>(obj: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(to_string(&sort_keys(&to_value(obj)?))?)
}

pub fn sort_keys(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            Value::Object(
                keys.into_iter()
                    .map(|key| (key.clone(), sort_keys(&obj[key])))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => json_value.clone(),
    }
}

/// Reads a JSON object given either inline or as a path to a `.json` file.
pub fn load_json_object(arg: &str) -> Result<Map<String, Value>> {
    let text = if arg.ends_with(".json") {
        fs::read_to_string(Path::new(arg))
            .map_err(|e| anyhow!("Failed to read json file '{}': {}", arg, e))?
    } else {
        arg.to_string()
    };
    match dejsonify::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("Expected a json object, got '{}'", other)),
    }
}
