//! Property-listing import from portal CSV exports. Hydrates an agent's
//! listings collection from whatever the portal produced, normalizing
//! price and status fields along the way.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::profiles::domain::{AgentProfile, ContentId, PropertyListing};

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read portal export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid portal CSV data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Result of an import: clean listings plus how many rows were dropped
/// for missing a title or an intelligible price.
#[derive(Debug)]
pub struct ListingImport {
    pub listings: Vec<PropertyListing>,
    pub skipped_rows: usize,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ContentId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ContentId(format!("lst-{id:06}"))
}

pub struct PortalListingImporter;

impl PortalListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ListingImport, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ListingImport, ListingImportError> {
        let mut listings = Vec::new();
        let mut skipped_rows = 0;

        for record in parser::parse_records(reader)? {
            let price_inr = match record.price_inr {
                Some(price) if !record.title.is_empty() => price,
                _ => {
                    skipped_rows += 1;
                    continue;
                }
            };

            listings.push(PropertyListing {
                id: next_listing_id(),
                title: record.title,
                locality: record.locality,
                price_inr,
                bedrooms: record.bedrooms,
                status: record.status,
                photo_urls: record.photo_urls,
            });
        }

        Ok(ListingImport {
            listings,
            skipped_rows,
        })
    }
}

/// Appends imported listings to the agent record.
pub fn attach(profile: &mut AgentProfile, import: ListingImport) -> usize {
    let added = import.listings.len();
    profile.listings.extend(import.listings);
    added
}
