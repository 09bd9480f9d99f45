//! SQL schema for the Rolo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS user (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      VARCHAR(150) NOT NULL UNIQUE,
    password_hash VARCHAR(150) NOT NULL   -- argon2 PHC string
);

-- Shared by all users; no owner column.
-- Every field is nullable; NULL reads back as the empty string.
CREATE TABLE IF NOT EXISTS contact (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  VARCHAR(100),
    phone VARCHAR(20),
    email VARCHAR(100)
);

PRAGMA user_version = 1;
";
