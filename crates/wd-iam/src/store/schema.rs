//! SQLite schema for the IAM tables.
//!
//! Ownership and scope references are real foreign keys so that a write
//! naming a missing principal is rejected by the store, including when two
//! writers race. `iam_scope` and `iam_user` reference each other; SQLite
//! resolves foreign keys at statement time, so declaration order is free.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS iam_scope (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        kind INTEGER NOT NULL CHECK (kind IN (1, 2)),
        owner_id INTEGER REFERENCES iam_user (id),
        name TEXT,
        description TEXT,
        create_time TEXT NOT NULL,
        update_time TEXT NOT NULL,
        CHECK ((kind = 1 AND owner_id IS NULL) OR (kind = 2 AND owner_id IS NOT NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS iam_user (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        primary_scope_id INTEGER NOT NULL REFERENCES iam_scope (id),
        owner_id INTEGER REFERENCES iam_user (id),
        root INTEGER NOT NULL DEFAULT 0 CHECK (root IN (0, 1)),
        name TEXT,
        create_time TEXT NOT NULL,
        update_time TEXT NOT NULL,
        CHECK ((root = 1 AND owner_id IS NULL) OR (root = 0 AND owner_id IS NOT NULL))
    )
    "#,
    // At most one root identity per scope.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS iam_user_root_per_scope
    ON iam_user (primary_scope_id) WHERE root = 1
    "#,
    // Root users are homed in organizations, on insert and on every later move.
    r#"
    CREATE TRIGGER IF NOT EXISTS iam_user_root_scope_insert
    BEFORE INSERT ON iam_user
    WHEN NEW.root = 1
        AND (SELECT kind FROM iam_scope WHERE id = NEW.primary_scope_id) = 2
    BEGIN
        SELECT RAISE(ABORT, 'root user must be homed in an organization scope');
    END
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS iam_user_root_scope_update
    BEFORE UPDATE OF primary_scope_id, root ON iam_user
    WHEN NEW.root = 1
        AND (SELECT kind FROM iam_scope WHERE id = NEW.primary_scope_id) = 2
    BEGIN
        SELECT RAISE(ABORT, 'root user must be homed in an organization scope');
    END
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS iam_group (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        primary_scope_id INTEGER NOT NULL REFERENCES iam_scope (id),
        owner_id INTEGER NOT NULL REFERENCES iam_user (id),
        name TEXT,
        description TEXT,
        create_time TEXT NOT NULL,
        update_time TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS iam_group_member (
        group_id INTEGER NOT NULL REFERENCES iam_group (id) ON DELETE CASCADE,
        member_id INTEGER NOT NULL REFERENCES iam_user (id) ON DELETE CASCADE,
        scope_id INTEGER NOT NULL REFERENCES iam_scope (id),
        create_time TEXT NOT NULL,
        PRIMARY KEY (group_id, member_id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS iam_group_member_member
    ON iam_group_member (member_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS iam_auth_method (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        primary_scope_id INTEGER NOT NULL REFERENCES iam_scope (id),
        owner_id INTEGER NOT NULL REFERENCES iam_user (id),
        kind INTEGER NOT NULL CHECK (kind IN (1, 2)),
        create_time TEXT NOT NULL,
        update_time TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS iam_user_alias (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        public_id TEXT NOT NULL UNIQUE,
        primary_scope_id INTEGER NOT NULL REFERENCES iam_scope (id),
        owner_id INTEGER NOT NULL REFERENCES iam_user (id),
        auth_method_id INTEGER NOT NULL REFERENCES iam_auth_method (id),
        external_id TEXT NOT NULL CHECK (length(trim(external_id)) > 0),
        create_time TEXT NOT NULL,
        update_time TEXT NOT NULL,
        UNIQUE (auth_method_id, external_id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS iam_user_alias_owner
    ON iam_user_alias (owner_id)
    "#,
];
