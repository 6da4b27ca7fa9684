use comfy_table::{Cell, Table};

use crate::context::AppContext;
use crate::error::{RegistryError, Result};
use crate::fmt::number;
use crate::models::{Owner, OwnerDocument, OwnerStatus};
use crate::store::{insert_owner, list_owners};

/// Validate the owner form fields. The document is stamped with the current
/// time and the owner starts out active.
pub fn parse_owner_form(first_name: &str, last_name: &str, document: &str, share: &str) -> Result<Owner> {
    let ownership_share: f64 = share.trim().replace(',', ".").parse().map_err(|_| {
        RegistryError::InvalidInput(format!("ownership share must be a number, got '{share}'"))
    })?;
    Ok(Owner {
        id: None,
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        document: OwnerDocument {
            number: document.trim().to_string(),
            issue_date: chrono::Local::now().to_rfc3339(),
        },
        ownership_share,
        status: OwnerStatus::Active,
    })
}

pub fn add(ctx: &AppContext, first_name: &str, last_name: &str, document: &str, share: &str) -> Result<()> {
    let owner = parse_owner_form(first_name, last_name, document, share)?;
    let id = insert_owner(&ctx.conn, &owner)?;
    println!("Added owner #{id}: {} {}", owner.first_name, owner.last_name);
    Ok(())
}

pub fn owners_table(ctx: &AppContext) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "First Name", "Last Name", "Document", "Share", "Status"]);
    for owner in list_owners(&ctx.conn)? {
        table.add_row(vec![
            Cell::new(owner.id.unwrap_or_default()),
            Cell::new(owner.first_name),
            Cell::new(owner.last_name),
            Cell::new(owner.document.number),
            Cell::new(number(owner.ownership_share)),
            Cell::new(owner.status),
        ]);
    }
    Ok(table)
}

pub fn list(ctx: &AppContext) -> Result<()> {
    println!("Owners\n{}", owners_table(ctx)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_form() {
        let owner = parse_owner_form("Anna", "Smith", "AB 123", "0,5").unwrap();
        assert_eq!(owner.ownership_share, 0.5);
        assert_eq!(owner.status, OwnerStatus::Active);
        assert_eq!(owner.document.number, "AB 123");
        assert!(chrono::DateTime::parse_from_rfc3339(&owner.document.issue_date).is_ok());
    }

    #[test]
    fn test_owner_form_rejects_bad_share() {
        assert!(matches!(
            parse_owner_form("Anna", "Smith", "AB", "half"),
            Err(RegistryError::InvalidInput(_))
        ));
    }
}
