//! Field selection on station records.
//!
//! A projected record only carries the fields the caller asked for.
//! Unrequested fields are absent from the serialized object, which is
//! different from a requested field whose value happens to be `null`
//! (a station without an address, say).

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::StationRecord;

/// Every field of a `StationRecord`, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StationField {
    StationId,
    Name,
    Address,
    Lat,
    Lon,
    Capacity,
    IsInstalled,
    IsRenting,
    IsReturning,
    NumBikesAvailable,
    NumDocksAvailable,
    LastReported,
}

impl StationField {
    pub const ALL: [StationField; 12] = [
        StationField::StationId,
        StationField::Name,
        StationField::Address,
        StationField::Lat,
        StationField::Lon,
        StationField::Capacity,
        StationField::IsInstalled,
        StationField::IsRenting,
        StationField::IsReturning,
        StationField::NumBikesAvailable,
        StationField::NumDocksAvailable,
        StationField::LastReported,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StationField::StationId => "station_id",
            StationField::Name => "name",
            StationField::Address => "address",
            StationField::Lat => "lat",
            StationField::Lon => "lon",
            StationField::Capacity => "capacity",
            StationField::IsInstalled => "is_installed",
            StationField::IsRenting => "is_renting",
            StationField::IsReturning => "is_returning",
            StationField::NumBikesAvailable => "num_bikes_available",
            StationField::NumDocksAvailable => "num_docks_available",
            StationField::LastReported => "last_reported",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Copy this field's value out of a record.
    pub fn value(self, record: &StationRecord) -> FieldValue {
        match self {
            StationField::StationId => FieldValue::Text(record.station_id.clone()),
            StationField::Name => FieldValue::Text(record.name.clone()),
            StationField::Address => FieldValue::OptionalText(record.address.clone()),
            StationField::Lat => FieldValue::Float(record.lat),
            StationField::Lon => FieldValue::Float(record.lon),
            StationField::Capacity => FieldValue::Integer(record.capacity),
            StationField::IsInstalled => FieldValue::Integer(record.is_installed.into()),
            StationField::IsRenting => FieldValue::Integer(record.is_renting.into()),
            StationField::IsReturning => FieldValue::Integer(record.is_returning.into()),
            StationField::NumBikesAvailable => FieldValue::Integer(record.num_bikes_available),
            StationField::NumDocksAvailable => FieldValue::Integer(record.num_docks_available),
            StationField::LastReported => FieldValue::Timestamp(record.last_reported),
        }
    }
}

impl fmt::Display for StationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a single record field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Float(f64),
    Integer(u32),
    Timestamp(DateTime<Utc>),
}

/// The set of fields a caller asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection(BTreeSet<StationField>);

impl FieldSelection {
    /// Build a selection from field names. Unknown names are ignored.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            names
                .into_iter()
                .filter_map(|n| StationField::from_name(n.trim()))
                .collect(),
        )
    }

    /// Parse a comma-separated list such as `station_id,num_bikes_available`.
    pub fn parse(list: &str) -> Self {
        Self::from_names(list.split(','))
    }

    pub fn contains(&self, field: StationField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StationField> + '_ {
        self.0.iter().copied()
    }

    /// Reduce one record to this selection.
    pub fn apply(&self, record: &StationRecord) -> PartialStationRecord {
        PartialStationRecord {
            fields: self.iter().map(|f| (f, f.value(record))).collect(),
        }
    }
}

impl FromIterator<StationField> for FieldSelection {
    fn from_iter<I: IntoIterator<Item = StationField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A station record reduced to a subset of its fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStationRecord {
    fields: BTreeMap<StationField, FieldValue>,
}

impl PartialStationRecord {
    /// Every field of the record.
    pub fn full(record: &StationRecord) -> Self {
        StationField::ALL.into_iter().collect::<FieldSelection>().apply(record)
    }

    /// Value of a field, if it was selected.
    pub fn get(&self, field: StationField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: StationField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Selected fields, in serialization order.
    pub fn fields(&self) -> impl Iterator<Item = StationField> + '_ {
        self.fields.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for PartialStationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// Project records onto a field selection, preserving order.
///
/// With no selection every field is kept.
pub fn project(
    records: &[StationRecord],
    selection: Option<&FieldSelection>,
) -> Vec<PartialStationRecord> {
    match selection {
        Some(selection) => records.iter().map(|r| selection.apply(r)).collect(),
        None => records.iter().map(PartialStationRecord::full).collect(),
    }
}
