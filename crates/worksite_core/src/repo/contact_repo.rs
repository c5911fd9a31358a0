//! Contact directory repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and substring search over the contact directory.
//! - Keep SQL matching details inside the repository boundary.
//!
//! # Invariants
//! - Listing and search results are sorted by name ascending, with
//!   unnamed contacts last; ties resolve by contact id.
//! - Search matches case-insensitively across name, email, phone, and
//!   address.

use crate::model::contact::{Contact, ContactId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CONTACT_SELECT_SQL: &str = "SELECT
    contact_uuid,
    name,
    email,
    phone,
    address,
    created_at
FROM contacts";

const CONTACT_ORDER_SQL: &str = "ORDER BY name IS NULL, name ASC, contact_uuid ASC";

/// Repository interface for contact directory operations.
pub trait ContactRepository {
    /// Persists one contact and returns it as re-read from storage.
    fn insert_contact(&self, contact: &Contact) -> RepoResult<Contact>;
    /// Loads one contact by id.
    fn get_contact(&self, contact_uuid: ContactId) -> RepoResult<Option<Contact>>;
    /// Lists the whole directory.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    /// Lists contacts whose fields contain `needle` (case-insensitive).
    fn search_contacts(&self, needle: &str) -> RepoResult<Vec<Contact>>;
    /// Deletes one contact.
    fn delete_contact(&self, contact_uuid: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact directory repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, contact: &Contact) -> RepoResult<Contact> {
        self.conn.execute(
            "INSERT INTO contacts (
                contact_uuid,
                name,
                email,
                phone,
                address,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                contact.contact_uuid.to_string(),
                contact.name.as_deref(),
                contact.email.as_deref(),
                contact.phone.as_deref(),
                contact.address.as_deref(),
                contact.created_at,
            ],
        )?;
        load_required_contact(self.conn, contact.contact_uuid)
    }

    fn get_contact(&self, contact_uuid: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE contact_uuid = ?1;"))?;
        let mut rows = stmt.query([contact_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} {CONTACT_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        collect_contacts(&mut rows)
    }

    fn search_contacts(&self, needle: &str) -> RepoResult<Vec<Contact>> {
        let pattern = format!("%{}%", escape_like(needle));
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE lower(coalesce(name, '')) LIKE lower(?1) ESCAPE '\\'
                OR lower(coalesce(email, '')) LIKE lower(?1) ESCAPE '\\'
                OR lower(coalesce(phone, '')) LIKE lower(?1) ESCAPE '\\'
                OR lower(coalesce(address, '')) LIKE lower(?1) ESCAPE '\\'
             {CONTACT_ORDER_SQL};"
        ))?;
        let mut rows = stmt.query([pattern])?;
        collect_contacts(&mut rows)
    }

    fn delete_contact(&self, contact_uuid: ContactId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM contacts WHERE contact_uuid = ?1;",
            [contact_uuid.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::ContactNotFound(contact_uuid));
        }
        Ok(())
    }
}

fn collect_contacts(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Contact>> {
    let mut contacts = Vec::new();
    while let Some(row) = rows.next()? {
        contacts.push(parse_contact_row(row)?);
    }
    Ok(contacts)
}

fn load_required_contact(conn: &Connection, contact_uuid: ContactId) -> RepoResult<Contact> {
    let mut stmt = conn.prepare(&format!("{CONTACT_SELECT_SQL} WHERE contact_uuid = ?1;"))?;
    let mut rows = stmt.query([contact_uuid.to_string()])?;
    if let Some(row) = rows.next()? {
        return parse_contact_row(row);
    }
    Err(RepoError::ContactNotFound(contact_uuid))
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let contact_uuid_text: String = row.get("contact_uuid")?;
    Ok(Contact {
        contact_uuid: parse_uuid(&contact_uuid_text, "contacts.contact_uuid")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_guards_wildcards() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
