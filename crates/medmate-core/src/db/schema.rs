//! SQLite schema definition.

/// Schema for the local interaction table.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Drug Interactions
-- ============================================================================

-- Pairs are stored with medicine_a <= medicine_b, both normalized
CREATE TABLE IF NOT EXISTS drug_interactions (
    id TEXT PRIMARY KEY,
    medicine_a TEXT NOT NULL,
    medicine_b TEXT NOT NULL,
    interaction_type TEXT NOT NULL,
    description TEXT NOT NULL,
    severity_level INTEGER,                      -- 1 (low) to 5 (major), NULL = unknown
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (medicine_a <= medicine_b),
    CHECK (severity_level IS NULL OR severity_level BETWEEN 1 AND 5),
    UNIQUE (medicine_a, medicine_b, interaction_type)
);

CREATE INDEX IF NOT EXISTS idx_interactions_a ON drug_interactions(medicine_a);
CREATE INDEX IF NOT EXISTS idx_interactions_b ON drug_interactions(medicine_b);
"#;
