use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::profiles::domain::ListingStatus;

use super::normalizer::{normalize_price, normalize_status};

#[derive(Debug)]
pub(crate) struct PortalRecord {
    pub(crate) title: String,
    pub(crate) locality: String,
    pub(crate) price_inr: Option<u64>,
    pub(crate) bedrooms: Option<u8>,
    pub(crate) status: ListingStatus,
    pub(crate) photo_urls: Vec<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PortalRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<PortalRow>() {
        let row = record?;
        records.push(PortalRecord {
            title: row.title.trim().to_string(),
            locality: row.locality.unwrap_or_default().trim().to_string(),
            price_inr: row.price.as_deref().and_then(normalize_price),
            bedrooms: row.bedrooms.as_deref().and_then(parse_bedrooms),
            status: normalize_status(row.status.as_deref().unwrap_or_default()),
            photo_urls: split_photo_urls(row.photos.as_deref().unwrap_or_default()),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct PortalRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Locality", default, deserialize_with = "empty_string_as_none")]
    locality: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(rename = "Bedrooms", default, deserialize_with = "empty_string_as_none")]
    bedrooms: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Photos", default, deserialize_with = "empty_string_as_none")]
    photos: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_bedrooms(value: &str) -> Option<u8> {
    // "3", "3 BHK", "3BHK" all mean three bedrooms.
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn split_photo_urls(value: &str) -> Vec<String> {
    value
        .split(['|', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
