use rusqlite::Connection;

use crate::error::{RegistryError, Result};
use crate::models::{House, Owner, OwnerDocument, Premise};

// ---------------------------------------------------------------------------
// Inserts
// ---------------------------------------------------------------------------

/// Insert a house and return its engine-assigned id.
pub fn insert_house(conn: &Connection, house: &House) -> Result<i64> {
    conn.execute(
        "INSERT INTO houses (address, build_year) VALUES (?1, ?2)",
        rusqlite::params![house.address, house.build_year],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_premise(conn: &Connection, premise: &Premise) -> Result<i64> {
    conn.execute(
        "INSERT INTO premises (house_id, number, area) VALUES (?1, ?2, ?3)",
        rusqlite::params![premise.house_id, premise.number, premise.area],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_owner(conn: &Connection, owner: &Owner) -> Result<i64> {
    if owner.document.number.trim().is_empty() {
        return Err(RegistryError::InvalidInput(
            "owner document number is required".to_string(),
        ));
    }
    conn.execute(
        "INSERT INTO owners (first_name, last_name, document_number, document_issue_date, ownership_share, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            owner.first_name,
            owner.last_name,
            owner.document.number,
            owner.document.issue_date,
            owner.ownership_share,
            owner.status,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ---------------------------------------------------------------------------
// Find-all queries
// ---------------------------------------------------------------------------

pub fn list_houses(conn: &Connection) -> Result<Vec<House>> {
    let mut stmt = conn.prepare("SELECT id, address, build_year FROM houses ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(House {
                id: Some(row.get(0)?),
                address: row.get(1)?,
                build_year: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_premises(conn: &Connection) -> Result<Vec<Premise>> {
    let mut stmt = conn.prepare("SELECT id, house_id, number, area FROM premises ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Premise {
                id: Some(row.get(0)?),
                house_id: row.get(1)?,
                number: row.get(2)?,
                area: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_owners(conn: &Connection) -> Result<Vec<Owner>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, document_number, document_issue_date, ownership_share, status \
         FROM owners ORDER BY id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Owner {
                id: Some(row.get(0)?),
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                document: OwnerDocument {
                    number: row.get(3)?,
                    issue_date: row.get(4)?,
                },
                ownership_share: row.get(5)?,
                status: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct StoreCounts {
    pub houses: i64,
    pub premises: i64,
    pub owners: i64,
}

pub fn counts(conn: &Connection) -> Result<StoreCounts> {
    let count = |table: &str| -> Result<i64> {
        Ok(conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?)
    };
    Ok(StoreCounts {
        houses: count("houses")?,
        premises: count("premises")?,
        owners: count("owners")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::models::OwnerStatus;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn house(address: &str, year: i64) -> House {
        House {
            id: None,
            address: address.to_string(),
            build_year: year,
        }
    }

    fn owner(doc: &str) -> Owner {
        Owner {
            id: None,
            first_name: "Anna".to_string(),
            last_name: "Smith".to_string(),
            document: OwnerDocument {
                number: doc.to_string(),
                issue_date: "2025-01-15T10:00:00+00:00".to_string(),
            },
            ownership_share: 0.5,
            status: OwnerStatus::Active,
        }
    }

    #[test]
    fn test_insert_house_returns_id() {
        let (_dir, conn) = test_db();
        let a = insert_house(&conn, &house("1 Main St", 1990)).unwrap();
        let b = insert_house(&conn, &house("2 Main St", 2001)).unwrap();
        assert_ne!(a, b);
        let houses = list_houses(&conn).unwrap();
        assert_eq!(houses.len(), 2);
        assert_eq!(houses[0].id, Some(a));
        assert_eq!(houses[1].build_year, 2001);
    }

    #[test]
    fn test_duplicate_addresses_accepted() {
        let (_dir, conn) = test_db();
        insert_house(&conn, &house("1 Main St", 1990)).unwrap();
        insert_house(&conn, &house("1 Main St", 1990)).unwrap();
        assert_eq!(list_houses(&conn).unwrap().len(), 2);
    }

    #[test]
    fn test_premise_requires_existing_house() {
        let (_dir, conn) = test_db();
        let premise = Premise {
            id: None,
            house_id: 42,
            number: "101".to_string(),
            area: 0.0,
        };
        assert!(insert_premise(&conn, &premise).is_err());
    }

    #[test]
    fn test_premise_roundtrip() {
        let (_dir, conn) = test_db();
        let house_id = insert_house(&conn, &house("1 Main St", 1990)).unwrap();
        insert_premise(
            &conn,
            &Premise {
                id: None,
                house_id,
                number: "101".to_string(),
                area: 54.2,
            },
        )
        .unwrap();
        let premises = list_premises(&conn).unwrap();
        assert_eq!(premises.len(), 1);
        assert_eq!(premises[0].house_id, house_id);
        assert_eq!(premises[0].area, 54.2);
    }

    #[test]
    fn test_owner_roundtrip() {
        let (_dir, conn) = test_db();
        insert_owner(&conn, &owner("AB123")).unwrap();
        let owners = list_owners(&conn).unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].document.number, "AB123");
        assert_eq!(owners[0].status, OwnerStatus::Active);
        assert_eq!(owners[0].ownership_share, 0.5);
    }

    #[test]
    fn test_owner_requires_document_number() {
        let (_dir, conn) = test_db();
        assert!(matches!(
            insert_owner(&conn, &owner("  ")),
            Err(RegistryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_list_owners_rejects_bad_status() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO owners (first_name, last_name, document_number, document_issue_date, ownership_share, status) \
             VALUES ('A', 'B', 'C', 'D', 1.0, 'archived')",
            [],
        )
        .unwrap();
        assert!(matches!(list_owners(&conn), Err(RegistryError::Db(_))));
    }

    #[test]
    fn test_counts() {
        let (_dir, conn) = test_db();
        let id = insert_house(&conn, &house("1 Main St", 1990)).unwrap();
        insert_premise(
            &conn,
            &Premise {
                id: None,
                house_id: id,
                number: "1".to_string(),
                area: 0.0,
            },
        )
        .unwrap();
        let c = counts(&conn).unwrap();
        assert_eq!((c.houses, c.premises, c.owners), (1, 1, 0));
    }
}
