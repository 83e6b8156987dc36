//! Merges raw client payloads from the lead CRM and the requirements store
//! into one de-duplicated, UI-ready record set.
//!
//! Records are mapped through the [`AliasTable`], then de-duplicated by their
//! derived identifier: the first occurrence wins and keeps its position. A raw
//! record without a usable phone number is skipped and only counted.
//!
//! Requirement-store records carry the id of the saved search, not of the
//! person, so clients built from them are always keyed by phone and fold into
//! any client already seen with the same phone.

use crate::domain::{
    phone_key, Budget, ClientRecord, LeadRecord, Preferences, PropertyConfiguration,
    PropertyRecord, RequirementRecord, SourceTag,
};
use crate::fields::{AliasTable, Field, RawRecord};
use crate::possession::NOT_SPECIFIED;
use crate::time::parse_timestamp;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

pub const NOT_AVAILABLE: &str = "N/A";

/// How a client's identifier is derived for lead CRM records. Requirement-store
/// records always use the phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdRule {
    /// Explicit id field when present, otherwise the normalized phone number.
    #[default]
    ExplicitThenPhone,
    /// Always the normalized phone number, which merges the same person across sources.
    PhoneOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub source: SourceTag,
    pub records: Vec<Value>,
}

impl SourceBatch {
    pub fn new(source: SourceTag, records: Vec<Value>) -> Self {
        Self { source, records }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciled<T> {
    pub records: Vec<T>,
    pub skipped: usize,
    pub duplicates: usize,
}

impl<T> Default for Reconciled<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
            duplicates: 0,
        }
    }
}

pub struct Reconciler<'a> {
    aliases: &'a AliasTable,
    id_rule: IdRule,
}

impl<'a> Reconciler<'a> {
    pub fn new(aliases: &'a AliasTable) -> Self {
        Self {
            aliases,
            id_rule: IdRule::default(),
        }
    }

    pub fn with_id_rule(mut self, id_rule: IdRule) -> Self {
        self.id_rule = id_rule;
        self
    }

    pub fn reconcile_clients(&self, batches: &[SourceBatch]) -> Reconciled<ClientRecord> {
        let mut out = Reconciled::default();
        let mut ids: HashSet<String> = HashSet::new();
        let mut phones: HashSet<String> = HashSet::new();
        for batch in batches {
            for value in &batch.records {
                let Some(client) = self.client_from_raw(batch.source, value) else {
                    out.skipped += 1;
                    continue;
                };
                let phone = phone_key(&client.phone);
                let known_phone = batch.source == SourceTag::RequirementStore
                    && phone.as_ref().is_some_and(|key| phones.contains(key));
                if known_phone || !ids.insert(client.id.clone()) {
                    out.duplicates += 1;
                    continue;
                }
                phones.extend(phone);
                out.records.push(client);
            }
        }
        out
    }

    pub fn reconcile_leads(&self, records: &[Value]) -> Reconciled<LeadRecord> {
        let candidates = records.iter().map(|value| self.lead_from_raw(value));
        keep_first_seen(candidates, |lead| lead.id.as_str())
    }

    pub fn reconcile_requirements(
        &self,
        source: SourceTag,
        records: &[Value],
    ) -> Reconciled<RequirementRecord> {
        let candidates = records
            .iter()
            .enumerate()
            .map(|(index, value)| self.requirement_from_raw(source, value, index));
        keep_first_seen(candidates, |requirement| requirement.id.as_str())
    }

    pub fn client_from_raw(&self, source: SourceTag, value: &Value) -> Option<ClientRecord> {
        let record = self.aliases.record(value)?;
        let phone = record.text(Field::Phone)?;
        let phone_id = phone_key(&phone)?;
        let id = match self.id_rule_for(source) {
            IdRule::ExplicitThenPhone => record.text(Field::ClientId).unwrap_or(phone_id),
            IdRule::PhoneOnly => phone_id,
        };

        Some(ClientRecord {
            id,
            name: display_name(&record),
            email: record
                .text(Field::Email)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            phone,
            location: record
                .text(Field::Location)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            preferences: self.preferences_from_raw(&record),
            last_contact: timestamp(&record, Field::LastContact),
            matched_count: matched_count(&record),
            priority: record.text(Field::Priority),
            site_visit_at: timestamp(&record, Field::SiteVisit),
            assigned_agent: record.text(Field::AssignedAgent),
            source,
        })
    }

    fn id_rule_for(&self, source: SourceTag) -> IdRule {
        match source {
            SourceTag::RequirementStore => IdRule::PhoneOnly,
            SourceTag::LeadCrm => self.id_rule,
        }
    }

    pub fn lead_from_raw(&self, value: &Value) -> Option<LeadRecord> {
        let record = self.aliases.record(value)?;
        let mobile = record.text(Field::Phone)?;
        let phone_id = phone_key(&mobile)?;
        let id = match self.id_rule_for(SourceTag::LeadCrm) {
            IdRule::ExplicitThenPhone => record.text(Field::ClientId).unwrap_or(phone_id),
            IdRule::PhoneOnly => phone_id,
        };

        Some(LeadRecord {
            id,
            name: display_name(&record),
            mobile,
            email: record.text(Field::Email),
            created_at: timestamp(&record, Field::CreatedAt),
            status: record.text(Field::Status),
        })
    }

    pub fn requirement_from_raw(
        &self,
        source: SourceTag,
        value: &Value,
        index: usize,
    ) -> Option<RequirementRecord> {
        let record = self.aliases.record(value)?;
        let phone = record.text(Field::Phone)?;
        let phone_id = phone_key(&phone)?;
        let id = record
            .text(Field::RequirementId)
            .unwrap_or_else(|| format!("{phone_id}-{index}"));
        let source = record
            .text(Field::Source)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(source);
        let properties = record
            .array(Field::Properties)
            .map(|items| self.properties_from_raw(items))
            .unwrap_or_default();

        Some(RequirementRecord {
            id,
            name: record
                .text(Field::RequirementName)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            source,
            phone,
            preferences: self.preferences_from_raw(&record),
            properties,
            created_at: timestamp(&record, Field::CreatedAt),
        })
    }

    pub fn properties_from_raw(&self, items: &[Value]) -> Vec<PropertyRecord> {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, value)| self.property_from_raw(value, index))
            .collect()
    }

    /// `index` is the listing's position in its containing list; it seeds the
    /// synthesized id when the payload carries none.
    pub fn property_from_raw(&self, value: &Value, index: usize) -> Option<PropertyRecord> {
        let record = self.aliases.record(value)?;
        let project_name = record
            .text(Field::ProjectName)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let id = record
            .text(Field::PropertyId)
            .unwrap_or_else(|| synthesize_property_id(&project_name, index));
        let configurations = record
            .array(Field::Configurations)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| record.nested(item))
                    .map(|variant| PropertyConfiguration {
                        bhk: variant.text(Field::VariantBhk),
                        facing: variant.text(Field::VariantFacing),
                        price: rupees(&variant, Field::VariantPrice),
                        size: variant.text(Field::VariantSize),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(PropertyRecord {
            id,
            project_name,
            area: record.text(Field::AreaName),
            configuration: record.text(Field::Bhk),
            base_price: rupees(&record, Field::BasePrice),
            size: record.text(Field::PropertySize),
            builder: record.text(Field::BuilderName),
            possession: record.text(Field::PropertyPossession),
            facing: record.text(Field::Facing),
            property_type: record.text(Field::PropertyKind),
            rera: record.text(Field::Rera),
            configurations,
        })
    }

    /// Reads the nested preferences object, or the record itself when the
    /// upstream flattens preference fields onto the top level.
    pub fn preferences_from_raw(&self, record: &RawRecord<'_>) -> Preferences {
        let scope = record.object(Field::Preferences).unwrap_or(*record);
        let or_default = |field: Field| {
            scope
                .text(field)
                .unwrap_or_else(|| NOT_SPECIFIED.to_string())
        };

        Preferences {
            property_type: or_default(Field::PropertyType),
            budget: budget(&scope),
            location: or_default(Field::PreferredLocation),
            possession: or_default(Field::Possession),
            configuration: or_default(Field::Configuration),
            size: or_default(Field::SizeRange),
        }
    }
}

/// Sets each client's match count from the requirements sharing its phone.
/// Clients without a matching requirement keep the count their payload carried.
pub fn attach_match_counts(
    clients: Vec<ClientRecord>,
    requirements: &[RequirementRecord],
) -> Vec<ClientRecord> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for requirement in requirements {
        if let Some(key) = phone_key(&requirement.phone) {
            *counts.entry(key).or_default() += requirement.properties.len();
        }
    }

    clients
        .into_iter()
        .map(|mut client| {
            if let Some(count) = phone_key(&client.phone).and_then(|key| counts.get(&key)) {
                client.matched_count = *count;
            }
            client
        })
        .collect()
}

pub fn requirements_for_phone<'r>(
    requirements: &'r [RequirementRecord],
    phone: &str,
) -> Vec<&'r RequirementRecord> {
    let Some(key) = phone_key(phone) else {
        return Vec::new();
    };
    requirements
        .iter()
        .filter(|requirement| phone_key(&requirement.phone).as_deref() == Some(key.as_str()))
        .collect()
}

fn keep_first_seen<T, I, K>(candidates: I, key: K) -> Reconciled<T>
where
    I: IntoIterator<Item = Option<T>>,
    K: Fn(&T) -> &str,
{
    let mut out = Reconciled::default();
    let mut seen: HashSet<String> = HashSet::new();
    for candidate in candidates {
        let Some(record) = candidate else {
            out.skipped += 1;
            continue;
        };
        if seen.insert(key(&record).to_string()) {
            out.records.push(record);
        } else {
            out.duplicates += 1;
        }
    }
    out
}

fn display_name(record: &RawRecord<'_>) -> String {
    record
        .text(Field::LastName)
        .or_else(|| record.text(Field::LeadName))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn timestamp(record: &RawRecord<'_>, field: Field) -> Option<i64> {
    record
        .text(field)
        .and_then(|value| parse_timestamp(&value))
}

fn matched_count(record: &RawRecord<'_>) -> usize {
    if let Some(items) = record.array(Field::Properties) {
        return items.len();
    }
    record
        .number(Field::MatchedCount)
        .filter(|count| *count >= 0.0)
        .map(|count| count as usize)
        .unwrap_or(0)
}

fn rupees(record: &RawRecord<'_>, field: Field) -> Option<u64> {
    record
        .number(field)
        .filter(|amount| *amount >= 0.0)
        .map(|amount| amount.round() as u64)
}

fn budget(scope: &RawRecord<'_>) -> Budget {
    if let Some(range) = scope.object(Field::Budget) {
        let min = rupees(&range, Field::BudgetMin);
        let max = rupees(&range, Field::BudgetMax);
        if min.is_some() || max.is_some() {
            return Budget::Range { min, max };
        }
    }
    scope
        .text(Field::Budget)
        .map(Budget::Text)
        .unwrap_or_default()
}

fn synthesize_property_id(project_name: &str, index: usize) -> String {
    let mut slug = String::with_capacity(project_name.len());
    for ch in project_name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() || project_name == NOT_AVAILABLE {
        format!("property-{index}")
    } else {
        format!("{slug}-{index}")
    }
}
