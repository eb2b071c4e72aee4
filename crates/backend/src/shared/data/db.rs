use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

use crate::shared::config;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

async fn has_table(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table_name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    table_name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    if !has_table(conn, table_name).await? {
        tracing::info!("Creating {} table", table_name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

const CREATE_A001_EMPLOYEE: &str = r#"
    CREATE TABLE a001_employee (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        position TEXT NOT NULL DEFAULT '',
        hire_date TEXT NOT NULL,
        termination_date TEXT,
        monthly_salary REAL NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A002_CONTRACTOR: &str = r#"
    CREATE TABLE a002_contractor (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        tax_id TEXT NOT NULL DEFAULT '',
        contact_email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        specialization TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A003_CLIENT: &str = r#"
    CREATE TABLE a003_client (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        tax_id TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        contact_person TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A004_PROJECT: &str = r#"
    CREATE TABLE a004_project (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        client_id TEXT NOT NULL,
        date_from TEXT NOT NULL,
        date_to TEXT,
        budget REAL NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'planned',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A005_PROJECT_PERIOD: &str = r#"
    CREATE TABLE a005_project_period (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        project_id TEXT NOT NULL,
        date_from TEXT NOT NULL,
        date_to TEXT NOT NULL,
        note TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A006_CONTRACT: &str = r#"
    CREATE TABLE a006_contract (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        client_id TEXT NOT NULL,
        contract_number TEXT NOT NULL,
        signed_date TEXT NOT NULL,
        valid_from TEXT NOT NULL,
        valid_to TEXT,
        total_amount REAL NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A007_INVOICE: &str = r#"
    CREATE TABLE a007_invoice (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        client_id TEXT NOT NULL,
        project_id TEXT,
        employee_id TEXT,
        invoice_number TEXT NOT NULL,
        issue_date TEXT NOT NULL,
        due_date TEXT NOT NULL,
        net_amount REAL NOT NULL DEFAULT 0,
        vat_rate REAL NOT NULL DEFAULT 0,
        commission_rate REAL NOT NULL DEFAULT 0,
        is_paid INTEGER NOT NULL DEFAULT 0,
        paid_date TEXT,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A008_DEBT: &str = r#"
    CREATE TABLE a008_debt (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        client_id TEXT NOT NULL,
        amount REAL NOT NULL DEFAULT 0,
        due_date TEXT NOT NULL,
        is_settled INTEGER NOT NULL DEFAULT 0,
        settled_date TEXT,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_A009_ABSENCE_DAY: &str = r#"
    CREATE TABLE a009_absence_day (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        employee_id TEXT NOT NULL,
        date TEXT NOT NULL,
        kind TEXT NOT NULL DEFAULT 'other',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        is_posted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_SYSTEM_LOG: &str = r#"
    CREATE TABLE system_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        source TEXT NOT NULL,
        category TEXT NOT NULL,
        message TEXT NOT NULL
    );
"#;

const CREATE_SYS_USERS: &str = r#"
    CREATE TABLE sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        last_login_at TEXT,
        created_by TEXT
    );
"#;

const CREATE_SYS_REFRESH_TOKENS: &str = r#"
    CREATE TABLE sys_refresh_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL,
        token_hash TEXT NOT NULL,
        expires_at TEXT NOT NULL,
        created_at TEXT NOT NULL,
        revoked_at TEXT
    );
"#;

const CREATE_SYS_SETTINGS: &str = r#"
    CREATE TABLE sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT,
        updated_at TEXT
    );
"#;

/// Инициализация подключения к БД и создание недостающих таблиц.
/// Путь к файлу БД берётся из config.toml, если не передан явно.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = match db_path {
        Some(path) => std::path::PathBuf::from(path),
        None => {
            let cfg = config::load_config()?;
            config::get_database_path(&cfg)?
        }
    };
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = build_sqlite_url(&absolute_path);
    let conn = Database::connect(&db_url).await?;

    // Ensure required tables exist (minimal schema bootstrap)
    ensure_table(&conn, "a001_employee", CREATE_A001_EMPLOYEE).await?;
    ensure_table(&conn, "a002_contractor", CREATE_A002_CONTRACTOR).await?;
    ensure_table(&conn, "a003_client", CREATE_A003_CLIENT).await?;
    ensure_table(&conn, "a004_project", CREATE_A004_PROJECT).await?;
    ensure_table(&conn, "a005_project_period", CREATE_A005_PROJECT_PERIOD).await?;
    ensure_table(&conn, "a006_contract", CREATE_A006_CONTRACT).await?;
    ensure_table(&conn, "a007_invoice", CREATE_A007_INVOICE).await?;
    ensure_table(&conn, "a008_debt", CREATE_A008_DEBT).await?;
    ensure_table(&conn, "a009_absence_day", CREATE_A009_ABSENCE_DAY).await?;
    ensure_table(&conn, "system_log", CREATE_SYSTEM_LOG).await?;
    ensure_table(&conn, "sys_users", CREATE_SYS_USERS).await?;
    ensure_table(&conn, "sys_refresh_tokens", CREATE_SYS_REFRESH_TOKENS).await?;
    ensure_table(&conn, "sys_settings", CREATE_SYS_SETTINGS).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sqlite_url_unix() {
        let url = build_sqlite_url(Path::new("/var/db/app.db"));
        assert_eq!(url, "sqlite:///var/db/app.db?mode=rwc");
    }

    #[test]
    fn test_build_sqlite_url_windows() {
        let url = build_sqlite_url(Path::new("C:\\data\\app.db"));
        assert_eq!(url, "sqlite:///C:/data/app.db?mode=rwc");
    }
}
