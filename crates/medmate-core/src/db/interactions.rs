//! Interaction table operations.

use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use super::{Database, DbError, DbResult};
use crate::resolver::{normalize_name, pair_key};

/// A row of the local interaction table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredInteraction {
    pub id: String,
    /// Normalized name, ordered before `medicine_b`
    pub medicine_a: String,
    pub medicine_b: String,
    /// e.g. "drug-drug", "drug-food"
    pub interaction_type: String,
    pub description: String,
    /// 1-5, `None` when the source gave no level
    pub severity_level: Option<i64>,
    pub created_at: String,
}

/// Built-in starter interactions: (a, b, type, description, level).
const DEFAULT_INTERACTIONS: &[(&str, &str, &str, &str, i64)] = &[
    ("aspirin", "warfarin", "drug-drug", "Aspirin adds to the anticoagulant effect of warfarin and increases the risk of bleeding.", 4),
    ("aspirin", "ibuprofen", "drug-drug", "Ibuprofen can reduce the cardioprotective effect of low-dose aspirin and both irritate the stomach lining.", 3),
    ("alcohol", "aspirin", "drug-food", "Alcohol with aspirin increases the risk of stomach bleeding.", 3),
    ("ibuprofen", "warfarin", "drug-drug", "NSAIDs such as ibuprofen increase the risk of bleeding with warfarin.", 4),
    ("vitamin k", "warfarin", "drug-food", "Vitamin K counteracts warfarin and can make it less effective.", 3),
    ("ibuprofen", "lisinopril", "drug-drug", "Ibuprofen can blunt the blood-pressure lowering effect of lisinopril and strain the kidneys.", 3),
    ("lisinopril", "potassium", "drug-drug", "Lisinopril raises potassium levels; potassium supplements can cause hyperkalemia.", 4),
    ("alcohol", "metformin", "drug-food", "Alcohol with metformin increases the risk of lactic acidosis and low blood sugar.", 4),
    ("contrast dye", "metformin", "drug-drug", "Iodinated contrast dye with metformin can cause kidney injury and lactic acidosis.", 5),
    ("grapefruit", "simvastatin", "drug-food", "Grapefruit raises simvastatin levels and the risk of muscle damage.", 4),
    ("gemfibrozil", "simvastatin", "drug-drug", "Gemfibrozil with simvastatin greatly increases the risk of rhabdomyolysis.", 5),
];

impl Database {
    /// Insert or update an interaction. Names are normalized and ordered.
    pub fn upsert_interaction(
        &self,
        first: &str,
        second: &str,
        interaction_type: &str,
        description: &str,
        severity_level: Option<i64>,
    ) -> DbResult<()> {
        let first = normalize_name(first);
        let second = normalize_name(second);
        if first.is_empty() || second.is_empty() {
            return Err(DbError::Constraint("medicine names must not be blank".into()));
        }
        if first == second {
            return Err(DbError::Constraint(format!(
                "a medicine cannot interact with itself: {}",
                first
            )));
        }
        if let Some(level) = severity_level {
            if !(1..=5).contains(&level) {
                return Err(DbError::Constraint(format!(
                    "severity level out of range: {}",
                    level
                )));
            }
        }

        let (medicine_a, medicine_b) = pair_key(&first, &second);
        self.conn.execute(
            r#"
            INSERT INTO drug_interactions (
                id, medicine_a, medicine_b, interaction_type, description, severity_level
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(medicine_a, medicine_b, interaction_type) DO UPDATE SET
                description = excluded.description,
                severity_level = excluded.severity_level
            "#,
            params![
                uuid::Uuid::new_v4().to_string(),
                medicine_a,
                medicine_b,
                interaction_type,
                description,
                severity_level,
            ],
        )?;
        Ok(())
    }

    /// Interactions recorded for an unordered pair of names.
    pub fn find_interactions(&self, first: &str, second: &str) -> DbResult<Vec<StoredInteraction>> {
        let first = normalize_name(first);
        let second = normalize_name(second);
        let (medicine_a, medicine_b) = pair_key(&first, &second);

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medicine_a, medicine_b, interaction_type, description, severity_level, created_at
            FROM drug_interactions
            WHERE medicine_a = ?1 AND medicine_b = ?2
            ORDER BY interaction_type, rowid
            "#,
        )?;

        let rows = stmt
            .query_map(params![medicine_a, medicine_b], row_to_interaction)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Get an interaction by id.
    pub fn get_interaction(&self, id: &str) -> DbResult<StoredInteraction> {
        self.conn
            .query_row(
                r#"
                SELECT id, medicine_a, medicine_b, interaction_type, description, severity_level, created_at
                FROM drug_interactions WHERE id = ?1
                "#,
                params![id],
                row_to_interaction,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(id.to_string()),
                other => DbError::Sqlite(other),
            })
    }

    /// Every medicine name that appears in the table, sorted.
    pub fn known_medicines(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT medicine_a FROM drug_interactions
            UNION
            SELECT medicine_b FROM drug_interactions
            ORDER BY 1
            "#,
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    pub fn count_interactions(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drug_interactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Load the built-in starter interactions. Safe to call repeatedly.
    pub fn seed_defaults(&self) -> DbResult<usize> {
        for (a, b, kind, description, level) in DEFAULT_INTERACTIONS {
            self.upsert_interaction(a, b, kind, description, Some(*level))?;
        }
        tracing::debug!(count = DEFAULT_INTERACTIONS.len(), "seeded interaction table");
        Ok(DEFAULT_INTERACTIONS.len())
    }
}

fn row_to_interaction(row: &Row<'_>) -> rusqlite::Result<StoredInteraction> {
    Ok(StoredInteraction {
        id: row.get(0)?,
        medicine_a: row.get(1)?,
        medicine_b: row.get(2)?,
        interaction_type: row.get(3)?,
        description: row.get(4)?,
        severity_level: row.get(5)?,
        created_at: row.get(6)?,
    })
}
