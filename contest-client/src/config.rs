use crate::api;

/// How the anti-forgery token travels with mutating requests
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenDelivery {
    #[default]
    FormField,
    Header,
    Both,
}

impl TokenDelivery {
    pub fn in_form(&self) -> bool {
        matches!(self, TokenDelivery::FormField | TokenDelivery::Both)
    }

    pub fn in_header(&self) -> bool {
        matches!(self, TokenDelivery::Header | TokenDelivery::Both)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub token_delivery: TokenDelivery,
    pub csrf_field: String,
    pub csrf_header: String,
    pub join_redirect_delay_ms: u64,
    pub join_message: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            token_delivery: TokenDelivery::default(),
            csrf_field: String::from(api::DEFAULT_CSRF_FIELD),
            csrf_header: String::from(api::DEFAULT_CSRF_HEADER),
            join_redirect_delay_ms: 1500,
            join_message: String::from(
                "You are already signed in. Redirecting you to the contest page.",
            ),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Builds a configuration out of JSON objects, later layers overriding
    /// earlier ones key by key; missing keys keep their default value
    pub fn from_layers<'a, I>(layers: I) -> Result<Config, serde_json::Error>
    where
        I: IntoIterator<Item = &'a serde_json::Value>,
    {
        let mut merged = serde_json::Map::new();
        for l in layers {
            match l {
                serde_json::Value::Object(o) => {
                    merged.extend(o.iter().map(|(k, v)| (k.clone(), v.clone())))
                }
                serde_json::Value::Null => (),
                other => tracing::warn!(layer=?other, "ignoring non-object configuration layer"),
            }
        }
        serde_json::from_value(serde_json::Value::Object(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_layers_give_defaults() {
        assert_eq!(
            Config::from_layers(std::iter::empty()).unwrap(),
            Config::default()
        );
        assert_eq!(
            Config::from_layers([&json!({}), &serde_json::Value::Null]).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn later_layers_override() {
        let page = json!({"token-delivery": "header", "join-redirect-delay-ms": 500});
        let local = json!({"join-redirect-delay-ms": 10, "log-level": "debug"});
        let c = Config::from_layers([&page, &local]).unwrap();
        assert_eq!(c.token_delivery, TokenDelivery::Header);
        assert_eq!(c.join_redirect_delay_ms, 10);
        assert_eq!(c.log_level, "debug");
        assert_eq!(c.csrf_field, "csrfmiddlewaretoken");
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(Config::from_layers([&json!({"token-delivery": "pigeon"})]).is_err());
    }

    #[test]
    fn delivery_channels() {
        assert!(TokenDelivery::FormField.in_form() && !TokenDelivery::FormField.in_header());
        assert!(!TokenDelivery::Header.in_form() && TokenDelivery::Header.in_header());
        assert!(TokenDelivery::Both.in_form() && TokenDelivery::Both.in_header());
    }
}
