//! Contact directory use-case service.
//!
//! # Responsibility
//! - Provide directory search, create, and delete operations.
//! - Reject drafts that carry no information.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::ContactRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from contact directory service operations.
#[derive(Debug)]
pub enum ContactServiceError {
    /// Every draft field was missing or whitespace-only.
    BlankContact,
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankContact => write!(f, "contact must have at least one field filled in"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ContactNotFound(contact_uuid) => Self::ContactNotFound(contact_uuid),
            other => Self::Repo(other),
        }
    }
}

/// Contact directory service facade.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a directory contact from draft fields.
    pub fn create_contact(&self, draft: ContactDraft) -> Result<Contact, ContactServiceError> {
        if draft.is_blank() {
            return Err(ContactServiceError::BlankContact);
        }
        let contact = Contact::from_draft(draft);
        self.repo.insert_contact(&contact).map_err(Into::into)
    }

    /// Loads one contact by id.
    pub fn get_contact(
        &self,
        contact_uuid: ContactId,
    ) -> Result<Option<Contact>, ContactServiceError> {
        self.repo.get_contact(contact_uuid).map_err(Into::into)
    }

    /// Searches the directory.
    ///
    /// A blank query returns the whole directory; anything else matches as
    /// a case-insensitive substring across name, email, phone, and
    /// address. Results are always sorted by name ascending, unnamed
    /// contacts last.
    pub fn search(&self, query: &str) -> Result<Vec<Contact>, ContactServiceError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.repo.list_contacts().map_err(Into::into);
        }
        self.repo.search_contacts(trimmed).map_err(Into::into)
    }

    /// Deletes one contact from the directory.
    ///
    /// Projects pointing at the contact fall back to no assignment.
    pub fn delete_contact(&self, contact_uuid: ContactId) -> Result<(), ContactServiceError> {
        self.repo.delete_contact(contact_uuid).map_err(Into::into)
    }
}
