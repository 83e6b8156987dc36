//! Data-driven field aliasing for upstream payloads.
//!
//! The lead CRM and the requirements store disagree on key names and casing
//! (`ProjectName` vs `projectname`, `mobile` vs `phone`). Every logical field
//! maps to an ordered list of raw keys; lookups walk the list left to right and
//! the first non-empty value wins. Payloads are only ever borrowed.

use crate::error::CoreError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

macro_rules! fields {
    ($($variant:ident => $name:literal => [$($key:literal),+ $(,)?]),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Field {
            $($variant),+
        }

        impl Field {
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Field::$variant => $name),+
                }
            }

            pub const fn all() -> &'static [Field] {
                &[$(Field::$variant),+]
            }

            const fn default_keys(self) -> &'static [&'static str] {
                match self {
                    $(Field::$variant => &[$($key),+]),+
                }
            }
        }
    };
}

fields! {
    ClientId => "client_id" => ["id", "_id", "clientId", "ClientId", "leadId", "LeadId"],
    Phone => "phone" => ["mobile", "Mobile", "mobileNumber", "phone", "Phone", "phoneNumber", "contactNumber"],
    LastName => "last_name" => ["lastName", "LastName", "last_name"],
    LeadName => "lead_name" => ["leadName", "LeadName", "lead_name", "name", "Name"],
    Email => "email" => ["email", "Email", "emailAddress"],
    Location => "location" => ["location", "Location", "city", "City"],
    LastContact => "last_contact" => ["lastContact", "lastContactedAt", "last_contact", "updatedAt", "createdAt", "CreatedOn"],
    CreatedAt => "created_at" => ["createdAt", "created_at", "CreatedOn", "createdOn"],
    Priority => "priority" => ["priority", "Priority", "leadPriority"],
    SiteVisit => "site_visit" => ["siteVisitDate", "siteVisit", "site_visit_at", "SiteVisitDate"],
    AssignedAgent => "assigned_agent" => ["assignedTo", "assigned_to", "agentId", "agent"],
    Status => "status" => ["status", "Status", "leadStatus"],
    MatchedCount => "matched_count" => ["matchedCount", "matchCount", "matched_properties_count"],
    Preferences => "preferences" => ["preferences", "Preferences", "requirement"],
    PropertyType => "property_type" => ["propertyType", "PropertyType", "property_type", "type"],
    Budget => "budget" => ["budget", "Budget"],
    BudgetMin => "budget_min" => ["min", "minBudget", "Min"],
    BudgetMax => "budget_max" => ["max", "maxBudget", "Max"],
    PreferredLocation => "preferred_location" => ["preferredLocation", "location", "Location", "area"],
    Possession => "possession" => ["possession", "possessionDate", "Possession"],
    Configuration => "configuration" => ["configuration", "Configuration", "bhk", "BHK"],
    SizeRange => "size_range" => ["size", "sizeRange", "Size"],
    RequirementId => "requirement_id" => ["id", "_id", "requirementId", "RequirementId"],
    RequirementName => "requirement_name" => ["name", "Name", "clientName", "leadName", "LeadName"],
    Source => "source" => ["source", "Source"],
    Properties => "properties" => ["properties", "matchedProperties", "matches", "Properties"],
    PropertyId => "property_id" => ["id", "_id", "propertyId", "PropertyId"],
    ProjectName => "project_name" => ["ProjectName", "projectname", "projectName", "project_name"],
    AreaName => "area_name" => ["AreaName", "areaname", "areaName", "area", "location"],
    Bhk => "bhk" => ["BHK", "bhk", "configuration", "Configuration"],
    BasePrice => "base_price" => ["BasePrice", "baseprice", "basePrice", "price", "Price"],
    PropertySize => "property_size" => ["Size", "size", "sqft", "carpetArea"],
    BuilderName => "builder_name" => ["BuilderName", "buildername", "builderName", "builder"],
    PropertyPossession => "property_possession" => ["Possession", "possession", "possessionDate", "PossessionDate"],
    Facing => "facing" => ["Facing", "facing"],
    PropertyKind => "property_kind" => ["PropertyType", "propertytype", "propertyType", "type"],
    Rera => "rera" => ["RERA", "rera", "reraNumber", "RERANumber"],
    Configurations => "configurations" => ["configurations", "Configurations", "configs", "units"],
    VariantBhk => "variant_bhk" => ["BHK", "bhk", "type"],
    VariantFacing => "variant_facing" => ["facing", "Facing"],
    VariantPrice => "variant_price" => ["price", "Price", "BasePrice", "baseprice"],
    VariantSize => "variant_size" => ["size", "Size", "sqft"],
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_ascii_lowercase().replace('-', "_");
        Field::all()
            .iter()
            .copied()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| CoreError::InvalidField(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    keys: HashMap<Field, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let keys = Field::all()
            .iter()
            .map(|field| {
                let keys = field
                    .default_keys()
                    .iter()
                    .map(|key| key.to_string())
                    .collect();
                (*field, keys)
            })
            .collect();
        Self { keys }
    }
}

impl AliasTable {
    pub fn with_override(mut self, field: Field, keys: Vec<String>) -> Result<Self, CoreError> {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();
        if keys.is_empty() {
            return Err(CoreError::EmptyAliasList(field.to_string()));
        }
        self.keys.insert(field, keys);
        Ok(self)
    }

    pub fn candidates(&self, field: Field) -> &[String] {
        self.keys.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record<'a>(&'a self, value: &'a Value) -> Option<RawRecord<'a>> {
        RawRecord::new(value, self)
    }
}

/// Read-only view over one loosely typed upstream object.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    map: &'a Map<String, Value>,
    aliases: &'a AliasTable,
}

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value, aliases: &'a AliasTable) -> Option<Self> {
        value.as_object().map(|map| Self { map, aliases })
    }

    pub fn text(&self, field: Field) -> Option<String> {
        self.first(field, |value| match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        })
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        self.first(field, |value| match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => parse_loose_number(text),
            _ => None,
        })
    }

    pub fn object(&self, field: Field) -> Option<RawRecord<'a>> {
        let aliases = self.aliases;
        self.first(field, |value| {
            value
                .as_object()
                .filter(|map| !map.is_empty())
                .map(|map| RawRecord { map, aliases })
        })
    }

    pub fn array(&self, field: Field) -> Option<&'a [Value]> {
        self.first(field, |value| {
            value
                .as_array()
                .filter(|items| !items.is_empty())
                .map(Vec::as_slice)
        })
    }

    pub fn nested(&self, value: &'a Value) -> Option<RawRecord<'a>> {
        RawRecord::new(value, self.aliases)
    }

    fn first<T>(&self, field: Field, pick: impl FnMut(&'a Value) -> Option<T>) -> Option<T> {
        self.aliases
            .candidates(field)
            .iter()
            .filter_map(|key| self.map.get(key.as_str()))
            .find_map(pick)
    }
}

fn parse_loose_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '_' | ' ' | '₹'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}
