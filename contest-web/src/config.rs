use contest_client::Config;
use gloo_storage::{LocalStorage, Storage};
use web_sys::Document;

const CONFIG_ELEMENT_ID: &str = "contest-config";
const CONFIG_STORAGE_KEY: &str = "contest-config";

/// Page-provided configuration, then the developer override from local storage
///
/// Runs before logging is set up, so problems are handed back for the caller
/// to log once it is.
pub fn load(document: &Document) -> (Config, Vec<String>) {
    let mut problems = Vec::new();
    let from_page = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
        .map(|t| match serde_json::from_str(&t) {
            Ok(v) => v,
            Err(e) => {
                problems.push(format!("ignoring malformed page configuration: {e}"));
                serde_json::Value::Null
            }
        })
        .unwrap_or(serde_json::Value::Null);
    let from_storage = LocalStorage::get::<serde_json::Value>(CONFIG_STORAGE_KEY)
        .unwrap_or(serde_json::Value::Null);
    let config = match Config::from_layers([&from_page, &from_storage]) {
        Ok(c) => c,
        Err(e) => {
            problems.push(format!("ignoring invalid configuration: {e}"));
            Config::default()
        }
    };
    (config, problems)
}
