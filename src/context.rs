use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::db::{get_connection, init_db, DB_FILE};
use crate::error::{RegistryError, Result};
use crate::settings::{load_settings, Settings};
use crate::table::{DisplayTable, TableKind};

/// Everything a command needs: the store connection, the settings it was
/// opened with, and the transient register and statement tables.
pub struct AppContext {
    pub conn: Connection,
    pub settings: Settings,
    pub registers: DisplayTable,
    pub statements: DisplayTable,
}

impl AppContext {
    /// Open the store under `settings.data_dir`. A missing database is fatal:
    /// run `registry init` first.
    pub fn open(settings: Settings) -> Result<Self> {
        let db_path = PathBuf::from(&settings.data_dir).join(DB_FILE);
        if !db_path.exists() {
            return Err(RegistryError::Settings(format!(
                "No database found at {}\nRun `registry init` to create one.",
                db_path.display()
            )));
        }
        let conn = get_connection(&db_path)?;
        init_db(&conn)?;
        debug!(db = %db_path.display(), "opened record store");
        Ok(Self::with_connection(conn, settings))
    }

    pub fn load() -> Result<Self> {
        Self::open(load_settings())
    }

    /// Create the data directory and schema if needed, then open.
    pub fn create(settings: Settings) -> Result<Self> {
        std::fs::create_dir_all(Path::new(&settings.data_dir))?;
        let conn = get_connection(&Path::new(&settings.data_dir).join(DB_FILE))?;
        init_db(&conn)?;
        Ok(Self::with_connection(conn, settings))
    }

    pub fn with_connection(conn: Connection, settings: Settings) -> Self {
        Self {
            conn,
            settings,
            registers: DisplayTable::new(TableKind::Register),
            statements: DisplayTable::new(TableKind::Statement),
        }
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut DisplayTable {
        match kind {
            TableKind::Register => &mut self.registers,
            TableKind::Statement => &mut self.statements,
        }
    }

    /// Close the store connection.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| RegistryError::Db(e))?;
        debug!("closed record store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Features;

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            data_dir: dir.join("data").to_string_lossy().to_string(),
            features: Features::default(),
        }
    }

    #[test]
    fn test_open_requires_database() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppContext::open(settings_in(dir.path())),
            Err(RegistryError::Settings(_))
        ));
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        AppContext::create(settings_in(dir.path())).unwrap().close().unwrap();
        let ctx = AppContext::open(settings_in(dir.path())).unwrap();
        assert!(ctx.registers.is_empty());
        assert_eq!(ctx.statements.kind(), TableKind::Statement);
        ctx.close().unwrap();
    }

    #[test]
    fn test_table_mut_selects_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = AppContext::create(settings_in(dir.path())).unwrap();
        ctx.table_mut(TableKind::Register).push_row(vec![Some("1".to_string())]);
        assert_eq!(ctx.registers.row_count(), 1);
        assert!(ctx.statements.is_empty());
    }
}
