//! Initial database migration.
//!
//! Creates the change-tracking tables, enums, indexes, and RLS policies.
//! Organization and user ids are opaque references into the host platform;
//! those tables live outside this schema, so no foreign keys point at them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: VERSION HISTORY
        // ============================================================
        db.execute_unprepared(ENTITY_VERSIONS_SQL).await?;

        // ============================================================
        // PART 3: CHANGE ALERTS
        // ============================================================
        db.execute_unprepared(CHANGE_ALERTS_SQL).await?;

        // ============================================================
        // PART 4: PERIOD SUMMARIES
        // ============================================================
        db.execute_unprepared(CHANGE_SUMMARIES_SQL).await?;

        // ============================================================
        // PART 5: ANALYSIS HISTORY
        // ============================================================
        db.execute_unprepared(ANALYSIS_HISTORY_SQL).await?;

        // ============================================================
        // PART 6: CHANGE TRACKERS
        // ============================================================
        db.execute_unprepared(CHANGE_TRACKERS_SQL).await?;

        // ============================================================
        // PART 7: ROW-LEVEL SECURITY
        // ============================================================
        db.execute_unprepared(RLS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Kinds of tracked entities
CREATE TYPE entity_type AS ENUM (
    'audience',
    'crosstab',
    'insight',
    'chart',
    'report',
    'dashboard',
    'brand_tracking'
);

-- What kind of mutation produced a version
CREATE TYPE change_type AS ENUM ('CREATE', 'UPDATE', 'DELETE', 'REGENERATE');

-- Alert classification
CREATE TYPE alert_type AS ENUM (
    'SIGNIFICANT_INCREASE',
    'SIGNIFICANT_DECREASE',
    'THRESHOLD_CROSSED',
    'NEW_DATA_AVAILABLE'
);

-- Alert severity levels
CREATE TYPE alert_severity AS ENUM ('INFO', 'WARNING', 'CRITICAL');

-- Summary aggregation windows
CREATE TYPE summary_period AS ENUM ('daily', 'weekly', 'monthly');
";

const ENTITY_VERSIONS_SQL: &str = r"
CREATE TABLE entity_versions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    entity_type entity_type NOT NULL,
    entity_id VARCHAR(255) NOT NULL,
    version INTEGER NOT NULL,
    data JSONB NOT NULL,
    delta JSONB,
    changed_fields JSONB NOT NULL DEFAULT '[]',
    change_type change_type NOT NULL,
    change_summary TEXT NOT NULL,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (organization_id, entity_type, entity_id, version)
);

CREATE INDEX idx_versions_entity ON entity_versions(organization_id, entity_type, entity_id, version DESC);
CREATE INDEX idx_versions_org_created ON entity_versions(organization_id, created_at DESC);
CREATE INDEX idx_versions_org_type_created ON entity_versions(organization_id, entity_type, created_at DESC);
";

const CHANGE_ALERTS_SQL: &str = r"
CREATE TABLE change_alerts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    entity_type entity_type NOT NULL,
    entity_id VARCHAR(255) NOT NULL,
    alert_type alert_type NOT NULL,
    severity alert_severity NOT NULL,
    title VARCHAR(255) NOT NULL,
    message TEXT NOT NULL,
    metric VARCHAR(100),
    previous_value DOUBLE PRECISION,
    current_value DOUBLE PRECISION,
    change_percent DOUBLE PRECISION,
    threshold DOUBLE PRECISION,
    is_read BOOLEAN NOT NULL DEFAULT false,
    is_dismissed BOOLEAN NOT NULL DEFAULT false,
    metadata JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_alerts_org_created ON change_alerts(organization_id, created_at DESC);
CREATE INDEX idx_alerts_entity ON change_alerts(organization_id, entity_type, entity_id);
CREATE INDEX idx_alerts_unread ON change_alerts(organization_id, created_at DESC)
    WHERE is_read = false AND is_dismissed = false;
";

const CHANGE_SUMMARIES_SQL: &str = r"
CREATE TABLE change_summaries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    period summary_period NOT NULL,
    period_start TIMESTAMPTZ NOT NULL,
    period_end TIMESTAMPTZ NOT NULL,
    summary_type VARCHAR(50) NOT NULL DEFAULT 'overview',
    total_changes INTEGER NOT NULL DEFAULT 0,
    new_items INTEGER NOT NULL DEFAULT 0,
    updated_items INTEGER NOT NULL DEFAULT 0,
    deleted_items INTEGER NOT NULL DEFAULT 0,
    significant_changes INTEGER NOT NULL DEFAULT 0,
    highlights JSONB NOT NULL DEFAULT '[]',
    top_changes JSONB NOT NULL DEFAULT '[]',
    metrics JSONB NOT NULL DEFAULT '{}',
    generated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (organization_id, period, period_start, summary_type)
);

CREATE INDEX idx_summaries_org_period ON change_summaries(organization_id, period, period_start DESC);
";

const ANALYSIS_HISTORY_SQL: &str = r"
CREATE TABLE analysis_history (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    analysis_type VARCHAR(100) NOT NULL,
    reference_id VARCHAR(255) NOT NULL,
    analysis_version INTEGER NOT NULL,
    results JSONB NOT NULL,
    ai_insights JSONB NOT NULL DEFAULT '[]',
    key_metrics JSONB NOT NULL DEFAULT '{}',
    confidence DOUBLE PRECISION,
    data_source_date TIMESTAMPTZ,
    created_by UUID,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (organization_id, analysis_type, reference_id, analysis_version)
);

CREATE INDEX idx_analysis_reference ON analysis_history(organization_id, analysis_type, reference_id, analysis_version DESC);
CREATE INDEX idx_analysis_org_created ON analysis_history(organization_id, created_at DESC);
";

const CHANGE_TRACKERS_SQL: &str = r"
CREATE TABLE change_trackers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    organization_id UUID NOT NULL,
    user_id UUID NOT NULL,
    last_visit TIMESTAMPTZ NOT NULL DEFAULT now(),
    last_seen_changes TIMESTAMPTZ,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (organization_id, user_id)
);
";

const RLS_SQL: &str = r"
-- ============================================================
-- ROW-LEVEL SECURITY POLICIES
-- Enable RLS on all tenant tables
-- ============================================================

ALTER TABLE entity_versions ENABLE ROW LEVEL SECURITY;
ALTER TABLE change_alerts ENABLE ROW LEVEL SECURITY;
ALTER TABLE change_summaries ENABLE ROW LEVEL SECURITY;
ALTER TABLE analysis_history ENABLE ROW LEVEL SECURITY;
ALTER TABLE change_trackers ENABLE ROW LEVEL SECURITY;

-- Create policies for tenant isolation
-- Application sets context before queries: SET app.current_organization_id = 'org-uuid';

CREATE POLICY tenant_isolation ON entity_versions
    USING (organization_id = current_setting('app.current_organization_id', true)::UUID);

CREATE POLICY tenant_isolation ON change_alerts
    USING (organization_id = current_setting('app.current_organization_id', true)::UUID);

CREATE POLICY tenant_isolation ON change_summaries
    USING (organization_id = current_setting('app.current_organization_id', true)::UUID);

CREATE POLICY tenant_isolation ON analysis_history
    USING (organization_id = current_setting('app.current_organization_id', true)::UUID);

CREATE POLICY tenant_isolation ON change_trackers
    USING (organization_id = current_setting('app.current_organization_id', true)::UUID);
";

const DROP_ALL_SQL: &str = r"
-- ============================================================
-- DROP ALL: Rollback migration
-- ============================================================

DROP TABLE IF EXISTS change_trackers CASCADE;
DROP TABLE IF EXISTS analysis_history CASCADE;
DROP TABLE IF EXISTS change_summaries CASCADE;
DROP TABLE IF EXISTS change_alerts CASCADE;
DROP TABLE IF EXISTS entity_versions CASCADE;

DROP TYPE IF EXISTS summary_period CASCADE;
DROP TYPE IF EXISTS alert_severity CASCADE;
DROP TYPE IF EXISTS alert_type CASCADE;
DROP TYPE IF EXISTS change_type CASCADE;
DROP TYPE IF EXISTS entity_type CASCADE;
";
