//! JSON export of a classified reading set.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use twinwatch_types::{Metric, Policies, ReadingSet, Status};

use super::Connectivity;
use crate::error::Result;

/// Serializable view of one tick: raw values, per-metric statuses and the
/// worst status overall.
#[derive(Debug, Clone, Serialize)]
pub struct Export {
    pub reading: ReadingSet,
    /// Keyed by the camelCase metric name; unclassified metrics are absent.
    pub statuses: BTreeMap<&'static str, Status>,
    pub overall: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<Connectivity>,
}

impl Export {
    pub fn new(
        reading: ReadingSet,
        policies: &Policies,
        connectivity: Option<Connectivity>,
    ) -> Self {
        let statuses = Metric::ALL
            .into_iter()
            .filter_map(|m| reading.status(m, policies).map(|s| (m.key(), s)))
            .collect();

        Self {
            reading,
            statuses,
            overall: reading.overall(policies),
            connectivity,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the export to a file, replacing it if present.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn reading() -> ReadingSet {
        ReadingSet {
            power_usage: 92,
            ..ReadingSet::default()
        }
    }

    #[test]
    fn test_export_shape() {
        let export = Export::new(reading(), &Policies::default(), Some(Connectivity::Offline));
        let json: serde_json::Value =
            serde_json::from_str(&export.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["reading"]["powerUsage"], 92);
        assert_eq!(json["statuses"]["powerUsage"], "critical");
        assert_eq!(json["statuses"]["airQuality"], "warning");
        assert!(json["statuses"].get("dataFlow").is_none());
        assert_eq!(json["overall"], "critical");
        assert_eq!(json["connectivity"], "offline");
    }

    #[test]
    fn test_export_omits_unknown_connectivity() {
        let export = Export::new(reading(), &Policies::default(), None);
        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("connectivity").is_none());
    }

    #[test]
    fn test_export_write() {
        let file = NamedTempFile::new().unwrap();
        Export::new(reading(), &Policies::default(), None)
            .write(file.path())
            .unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("\"overall\": \"critical\""));
    }
}
