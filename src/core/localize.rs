//! Table and field name localization
//!
//! Serializers render canonical English names (`states`, `state_id`, `name`)
//! unless a [`Localization`] is supplied, in which case every table name and
//! record key is translated through its catalog at render time.

use crate::domain::{EntityKind, GeodataError, Result};
use std::collections::HashMap;

/// Locales with a built-in catalog
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "pt_BR"];

/// Translation catalog keyed by canonical names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Localization {
    locale: String,
    catalog: HashMap<String, String>,
}

impl Localization {
    /// Builds the catalog for a supported locale
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unknown locales.
    pub fn for_locale(locale: &str) -> Result<Self> {
        match locale {
            "en" => Ok(Self {
                locale: locale.to_string(),
                catalog: HashMap::new(),
            }),
            "pt_BR" => Ok(Self {
                locale: locale.to_string(),
                catalog: portuguese_catalog(),
            }),
            _ => Err(GeodataError::Configuration(format!(
                "Unsupported locale '{}'. Must be one of: {}",
                locale,
                SUPPORTED_LOCALES.join(", ")
            ))),
        }
    }

    /// Builds a localization from explicit entries
    pub fn from_entries<I, K, V>(locale: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            locale: locale.to_string(),
            catalog: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translates a canonical key, falling back to the key itself
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.get(key).map(String::as_str).unwrap_or(key)
    }
}

/// Translates through an optional localization
pub fn localize<'a>(localization: Option<&'a Localization>, key: &'a str) -> &'a str {
    match localization {
        Some(l) => l.translate(key),
        None => key,
    }
}

/// Legacy Portuguese names used by the historical DTB exports
fn portuguese_catalog() -> HashMap<String, String> {
    let singular = |kind: EntityKind| match kind {
        EntityKind::State => "uf",
        EntityKind::Mesoregion => "mesorregiao",
        EntityKind::Microregion => "microrregiao",
        EntityKind::Municipality => "municipio",
        EntityKind::District => "distrito",
        EntityKind::Subdistrict => "subdistrito",
    };

    let mut catalog = HashMap::new();
    catalog.insert("id".to_string(), "id".to_string());
    catalog.insert("name".to_string(), "nome".to_string());
    for kind in EntityKind::ALL {
        let pt = singular(kind);
        catalog.insert(kind.table_name().to_string(), pt.to_string());
        catalog.insert(kind.id_field().to_string(), format!("id_{pt}"));
        catalog.insert(kind.name_field().to_string(), format!("nome_{pt}"));
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_is_identity() {
        let l = Localization::for_locale("en").unwrap();
        assert_eq!(l.translate("states"), "states");
        assert_eq!(l.translate("state_id"), "state_id");
    }

    #[test]
    fn test_portuguese_catalog() {
        let l = Localization::for_locale("pt_BR").unwrap();
        assert_eq!(l.translate("states"), "uf");
        assert_eq!(l.translate("municipalities"), "municipio");
        assert_eq!(l.translate("mesoregion_id"), "id_mesorregiao");
        assert_eq!(l.translate("district_name"), "nome_distrito");
        assert_eq!(l.translate("name"), "nome");
        assert_eq!(l.translate("unmapped"), "unmapped");
    }

    #[test]
    fn test_unknown_locale() {
        assert!(matches!(
            Localization::for_locale("fr"),
            Err(GeodataError::Configuration(_))
        ));
    }

    #[test]
    fn test_localize_none() {
        assert_eq!(localize(None, "states"), "states");
    }
}
