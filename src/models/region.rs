//! Region reference data
//!
//! Regions come from the organisation's API and are offered as `direction`
//! values when a declaration is entered.

use serde::{Deserialize, Serialize};

/// A region as returned by the regions endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: i64,
    pub name: String,
}

/// Find a region by name, ignoring case and surrounding whitespace
pub fn find_region<'a>(regions: &'a [Region], name: &str) -> Option<&'a Region> {
    let name = name.trim();
    regions
        .iter()
        .find(|r| r.name.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_region_list() {
        let regions: Vec<Region> =
            serde_json::from_str(r#"[{"id": 1, "name": "DR Alger"}, {"id": 2, "name": "DR Oran"}]"#)
                .unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].name, "DR Oran");
    }

    #[test]
    fn test_find_region() {
        let regions = vec![Region {
            id: 7,
            name: "DR Constantine".into(),
        }];
        assert_eq!(find_region(&regions, " dr constantine").map(|r| r.id), Some(7));
        assert!(find_region(&regions, "DR Oran").is_none());
    }
}
