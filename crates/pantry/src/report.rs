use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use larder_catalog::Labels;
use serde::Serialize;

use crate::{DEFAULT_EXPIRING_DAYS, PantryLogEntry, PantryLogKind};

/// Reports cover the last 30 days when no start date is given.
pub const DEFAULT_REPORT_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportRange {
    pub fn new(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> larder_shared::Result<Self> {
        let to = to.unwrap_or(today);
        let from = match from {
            Some(from) => from,
            None => to
                .checked_sub_days(Days::new(DEFAULT_REPORT_DAYS))
                .unwrap_or(NaiveDate::MIN),
        };

        if from > to {
            larder_shared::user!("'from' must not be after 'to'");
        }

        Ok(Self { from, to })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub name: String,
    pub unit_id: String,
    pub unit: String,
    pub quantity: f64,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub kind: PantryLogKind,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_entries: usize,
    pub items: Vec<ReportLine>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub consumed_entries: usize,
    pub wasted_entries: usize,
    pub expired_count: usize,
    pub expiring_count: usize,
    pub consumed: Vec<ReportLine>,
    pub wasted: Vec<ReportLine>,
}

/// Sums log entries per case-insensitive name and unit.
///
/// The first spelling of a name is kept for display. Lines come back sorted
/// by name then unit label.
pub fn group_entries(entries: &[PantryLogEntry], labels: &Labels) -> Vec<ReportLine> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut lines: Vec<ReportLine> = Vec::new();

    for entry in entries {
        let key = (entry.name.to_lowercase(), entry.unit_id.to_owned());

        match index.get(&key) {
            Some(pos) => {
                lines[*pos].quantity += entry.quantity;
                lines[*pos].entries += 1;
            }
            None => {
                index.insert(key, lines.len());
                lines.push(ReportLine {
                    name: entry.name.to_owned(),
                    unit_id: entry.unit_id.to_owned(),
                    unit: labels.unit(&entry.unit_id),
                    quantity: entry.quantity,
                    entries: 1,
                });
            }
        }
    }

    lines.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.unit.cmp(&b.unit))
    });

    lines
}

impl super::Query {
    pub async fn report(
        &self,
        owner_id: &str,
        kind: PantryLogKind,
        range: ReportRange,
    ) -> larder_shared::Result<Report> {
        let entries = self.logs(owner_id, kind, range.from, range.to).await?;
        let labels = larder_catalog::Query(self.0.clone()).labels().await?;

        Ok(Report {
            kind,
            from: range.from,
            to: range.to,
            total_entries: entries.len(),
            items: group_entries(&entries, &labels),
        })
    }

    /// Consumption and waste over the range plus the current expiry state of
    /// the pantry as seen from `today`.
    pub async fn summary(
        &self,
        owner_id: &str,
        range: ReportRange,
        today: NaiveDate,
    ) -> larder_shared::Result<Summary> {
        let consumed = self.report(owner_id, PantryLogKind::Consumed, range).await?;
        let wasted = self.report(owner_id, PantryLogKind::Wasted, range).await?;
        let expired = self.expired(owner_id, today).await?;
        let expiring = self
            .expiring(owner_id, today, DEFAULT_EXPIRING_DAYS)
            .await?;

        Ok(Summary {
            from: range.from,
            to: range.to,
            consumed_entries: consumed.total_entries,
            wasted_entries: wasted.total_entries,
            expired_count: expired.len(),
            expiring_count: expiring.len(),
            consumed: consumed.items,
            wasted: wasted.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, quantity: f64, unit_id: &str) -> PantryLogEntry {
        PantryLogEntry {
            id: larder_shared::new_id(),
            owner_id: "john".to_owned(),
            pantry_item_id: "item".to_owned(),
            name: name.to_owned(),
            quantity,
            unit_id: unit_id.to_owned(),
            category_id: "dairy".to_owned(),
            kind: PantryLogKind::Wasted,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            created_at: 0,
        }
    }

    #[test]
    fn test_group_entries_by_name_and_unit() {
        let labels = Labels::default().with_unit("ml", "ml").with_unit("l", "L");
        let entries = vec![
            entry("Milk", 100.0, "ml"),
            entry("bread", 1.0, "pcs"),
            entry("milk", 50.0, "ml"),
            entry("milk", 1.0, "l"),
        ];

        let lines = group_entries(&entries, &labels);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].name, "bread");
        assert_eq!(lines[0].unit, "pcs");
        assert_eq!(lines[1].name, "milk");
        assert_eq!(lines[1].unit, "L");
        assert_eq!(lines[1].quantity, 1.0);
        assert_eq!(lines[2].name, "Milk");
        assert_eq!(lines[2].quantity, 150.0);
        assert_eq!(lines[2].entries, 2);
    }

    #[test]
    fn test_report_range_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let range = ReportRange::new(None, None, today).unwrap();
        assert_eq!(range.to, today);
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());

        let invalid = ReportRange::new(Some(today), NaiveDate::from_ymd_opt(2024, 3, 1), today);
        assert!(matches!(invalid, Err(larder_shared::Error::User(_))));
    }
}
