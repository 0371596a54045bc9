//! In-memory package.json.
//! Keeps every key in file order so a rewrite only differs in the patched entry and whitespace.

use serde_json::{Map, Value};

use crate::config::{BuildCommand, SCRIPTS_KEY};
use crate::error::{PatchError, Result};

/// Top-level JSON object loaded from disk.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigDocument(Map<String, Value>);

impl ConfigDocument {
    /// Wraps a parsed JSON value. Anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PatchError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// Overwrites `scripts[name]` and returns whatever was there before.
    ///
    /// An existing entry keeps its position; a new one goes last.
    pub fn set_script(&mut self, name: &str, command: &BuildCommand) -> Result<Option<Value>> {
        let scripts = self
            .0
            .get_mut(SCRIPTS_KEY)
            .ok_or(PatchError::MissingScripts { key: SCRIPTS_KEY })?;

        let found = json_type(scripts);
        let scripts = scripts
            .as_object_mut()
            .ok_or(PatchError::ScriptsNotObject {
                key: SCRIPTS_KEY,
                found,
            })?;

        Ok(scripts.insert(name.to_string(), Value::from(command.as_str())))
    }

    /// Two-space indented JSON without a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(PatchError::Serialize)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ConfigDocument {
        ConfigDocument::from_value(value).unwrap()
    }

    fn script<'a>(document: &'a ConfigDocument, name: &str) -> Option<&'a Value> {
        document.0.get(SCRIPTS_KEY)?.as_object()?.get(name)
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = ConfigDocument::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, PatchError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn test_set_script_replaces_existing_entry() {
        let mut document = doc(json!({
            "scripts": { "build:cf": "old-command", "dev": "next dev" }
        }));

        let previous = document
            .set_script("build:cf", &BuildCommand::from("new-command"))
            .unwrap();

        assert_eq!(previous, Some(json!("old-command")));
        assert_eq!(
            Value::Object(document.0),
            json!({ "scripts": { "build:cf": "new-command", "dev": "next dev" } })
        );
    }

    #[test]
    fn test_set_script_appends_missing_entry() {
        let mut document = doc(json!({ "scripts": { "dev": "next dev" } }));

        let previous = document
            .set_script("build:cf", &BuildCommand::from("x"))
            .unwrap();

        assert_eq!(previous, None);
        let keys: Vec<&str> = document.0["scripts"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["dev", "build:cf"]);
    }

    #[test]
    fn test_set_script_keeps_key_order() {
        let mut document = doc(json!({
            "name": "project-01",
            "scripts": { "lint": "next lint", "build:cf": "old", "dev": "next dev" },
            "dependencies": { "next": "15.0.0" }
        }));

        document
            .set_script("build:cf", &BuildCommand::from("new"))
            .unwrap();

        let text = document.to_pretty_string().unwrap();
        let lint = text.find("\"lint\"").unwrap();
        let build = text.find("\"build:cf\"").unwrap();
        let dev = text.find("\"dev\"").unwrap();
        assert!(lint < build && build < dev);
        assert!(text.find("\"name\"").unwrap() < text.find("\"dependencies\"").unwrap());
    }

    #[test]
    fn test_set_script_overwrites_non_string_value() {
        let mut document = doc(json!({ "scripts": { "build:cf": 42 } }));

        let previous = document
            .set_script("build:cf", &BuildCommand::from("x"))
            .unwrap();

        assert_eq!(previous, Some(json!(42)));
        assert_eq!(script(&document, "build:cf"), Some(&json!("x")));
    }

    #[test]
    fn test_set_script_missing_scripts() {
        let mut document = doc(json!({ "name": "x" }));

        let err = document
            .set_script("build:cf", &BuildCommand::default())
            .unwrap_err();

        assert!(matches!(err, PatchError::MissingScripts { key: "scripts" }));
        assert_eq!(Value::Object(document.0), json!({ "name": "x" }));
    }

    #[test]
    fn test_set_script_scripts_not_object() {
        let mut document = doc(json!({ "scripts": "next build" }));

        let err = document
            .set_script("build:cf", &BuildCommand::default())
            .unwrap_err();

        assert!(matches!(
            err,
            PatchError::ScriptsNotObject {
                found: "a string",
                ..
            }
        ));
    }

    #[test]
    fn test_pretty_string_layout() {
        let document = doc(json!({ "scripts": { "dev": "next dev" }, "private": true }));
        assert_eq!(
            document.to_pretty_string().unwrap(),
            "{\n  \"scripts\": {\n    \"dev\": \"next dev\"\n  },\n  \"private\": true\n}"
        );
    }
}
