//! Deserialization for `Manifest`
//!
//! The `files` object is read with a map visitor so that category order in the
//! JSON source is kept; install order follows it.

use serde::de::{self, MapAccess, Visitor};
use serde::Deserializer;
use std::fmt;

use super::CategoryEntries;

/// Deserialize a manifest into its version and ordered category list
pub fn deserialize_manifest<'de, D>(
    deserializer: D,
) -> std::result::Result<(String, Vec<CategoryEntries>), D::Error>
where
    D: Deserializer<'de>,
{
    struct ManifestVisitor;

    impl<'de> Visitor<'de> for ManifestVisitor {
        type Value = (String, Vec<CategoryEntries>);

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a manifest object with \"version\" and \"files\"")
        }

        fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut version: Option<String> = None;
            let mut files: Option<Vec<CategoryEntries>> = None;

            while let Some(key) = map.next_key::<String>()? {
                match key.as_str() {
                    "version" => version = Some(map.next_value()?),
                    "files" => files = Some(map.next_value::<OrderedFiles>()?.0),
                    _ => {
                        map.next_value::<de::IgnoredAny>()?;
                    }
                }
            }

            let version = version.ok_or_else(|| de::Error::missing_field("version"))?;
            let files = files.ok_or_else(|| de::Error::missing_field("files"))?;
            Ok((version, files))
        }
    }

    deserializer.deserialize_map(ManifestVisitor)
}

struct OrderedFiles(Vec<CategoryEntries>);

impl<'de> serde::Deserialize<'de> for OrderedFiles {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FilesVisitor;

        impl<'de> Visitor<'de> for FilesVisitor {
            type Value = OrderedFiles;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping category names to lists of entries")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<OrderedFiles, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut categories: Vec<CategoryEntries> = Vec::new();

                while let Some(category) = map.next_key::<String>()? {
                    if categories.iter().any(|c| c.category == category) {
                        return Err(de::Error::custom(format!(
                            "duplicate category '{category}'"
                        )));
                    }
                    let entries: Vec<String> = map.next_value()?;
                    categories.push(CategoryEntries { category, entries });
                }

                Ok(OrderedFiles(categories))
            }
        }

        deserializer.deserialize_map(FilesVisitor)
    }
}
