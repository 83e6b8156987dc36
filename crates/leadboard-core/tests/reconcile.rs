use leadboard_core::reconcile::{attach_match_counts, requirements_for_phone};
use leadboard_core::{AliasTable, Reconciler, SourceBatch, SourceTag};
use serde_json::json;

#[test]
fn first_seen_record_wins_across_batches() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let batches = vec![
        SourceBatch::new(
            SourceTag::LeadCrm,
            vec![json!({ "id": "C-1", "mobile": "9845012345", "leadName": "Asha", "email": "asha@crm.example" })],
        ),
        SourceBatch::new(
            SourceTag::RequirementStore,
            vec![
                json!({ "id": "C-1", "phone": "9845012345", "name": "Asha Kumar", "email": "asha@store.example" }),
                json!({ "phone": "9000000001", "name": "Vikram" }),
            ],
        ),
    ];

    let out = reconciler.reconcile_clients(&batches);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.duplicates, 1);
    assert_eq!(out.skipped, 0);
    assert_eq!(out.records[0].name, "Asha");
    assert_eq!(out.records[0].email, "asha@crm.example");
    assert_eq!(out.records[0].source, SourceTag::LeadCrm);
    assert_eq!(out.records[1].id, "9000000001");
}

#[test]
fn records_without_phone_are_skipped() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let batches = vec![SourceBatch::new(
        SourceTag::LeadCrm,
        vec![
            json!({ "leadName": "No Contact" }),
            json!({ "id": "C-7", "leadName": "Id Only" }),
            json!("not an object"),
            json!({ "mobile": "9845012345", "leadName": "Kept" }),
        ],
    )];

    let out = reconciler.reconcile_clients(&batches);
    assert_eq!(out.skipped, 3);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].name, "Kept");
}

#[test]
fn missing_fields_fall_back_to_placeholders() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let client = reconciler
        .client_from_raw(SourceTag::LeadCrm, &json!({ "mobile": "9845012345" }))
        .expect("client");

    assert_eq!(client.name, "N/A");
    assert_eq!(client.email, "N/A");
    assert_eq!(client.preferences.property_type, "Not specified");
    assert_eq!(client.preferences.budget.to_string(), "Not specified");
    assert_eq!(client.preferences.location, "Not specified");
    assert_eq!(client.preferences.possession, "Not specified");
    assert_eq!(client.preferences.configuration, "Not specified");
    assert_eq!(client.preferences.size, "Not specified");
    assert_eq!(client.matched_count, 0);
}

#[test]
fn flat_preferences_are_read_from_top_level() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let client = reconciler
        .client_from_raw(
            SourceTag::RequirementStore,
            &json!({
                "mobile": "9845012345",
                "propertyType": "Villa",
                "budget": "2-3 Cr",
                "preferredLocation": "Sarjapur",
                "bhk": "4BHK",
                "lastContact": "2024-06-01",
                "siteVisitDate": "2024-06-10T11:00:00+05:30",
                "priority": "Hot",
                "assignedTo": "asha"
            }),
        )
        .expect("client");

    assert_eq!(client.preferences.property_type, "Villa");
    assert_eq!(client.preferences.budget.to_string(), "2-3 Cr");
    assert_eq!(client.preferences.location, "Sarjapur");
    assert_eq!(client.preferences.configuration, "4BHK");
    assert!(client.last_contact.is_some());
    assert!(client.has_site_visit());
    assert_eq!(client.priority.as_deref(), Some("Hot"));
    assert_eq!(client.assigned_agent.as_deref(), Some("asha"));
}

#[test]
fn requirements_map_properties_and_synthesize_ids() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let raw = vec![json!({
        "_id": "REQ-1",
        "name": "Asha",
        "phone": "+91 98450 12345",
        "source": "lead-crm",
        "preferences": { "propertyType": "Apartment", "bhk": "3BHK" },
        "matchedProperties": [
            {
                "ProjectName": "Prestige Lakeside",
                "AreaName": "Whitefield",
                "BHK": "3BHK",
                "BasePrice": 14500000,
                "Possession": "RTM",
                "RERA": "PRM/KA/RERA/1251"
            },
            {
                "projectname": "Sobha Dream Acres",
                "areaname": "Panathur",
                "bhk": "2BHK",
                "baseprice": "85,00,000",
                "possession": "12/2027",
                "configurations": [
                    { "bhk": "2BHK", "facing": "East", "price": 8500000, "size": "1100" },
                    { "bhk": "3BHK", "facing": "North", "price": 11500000, "size": "1450" }
                ]
            },
            "garbage"
        ]
    })];

    let out = reconciler.reconcile_requirements(SourceTag::RequirementStore, &raw);
    assert_eq!(out.records.len(), 1);
    let requirement = &out.records[0];
    assert_eq!(requirement.id, "REQ-1");
    assert_eq!(requirement.source, SourceTag::LeadCrm);
    assert_eq!(requirement.preferences.configuration, "3BHK");
    assert_eq!(requirement.properties.len(), 2);

    let first = &requirement.properties[0];
    assert_eq!(first.id, "prestige-lakeside-0");
    assert_eq!(first.base_price, Some(14_500_000));
    assert_eq!(first.rera.as_deref(), Some("PRM/KA/RERA/1251"));

    let second = &requirement.properties[1];
    assert_eq!(second.id, "sobha-dream-acres-1");
    assert_eq!(second.area.as_deref(), Some("Panathur"));
    assert_eq!(second.base_price, Some(8_500_000));
    assert_eq!(second.configurations.len(), 2);
    assert_eq!(second.configurations[1].price, Some(11_500_000));
}

#[test]
fn requirement_ids_fall_back_to_phone_and_position() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let raw = vec![
        json!({ "phone": "9845012345" }),
        json!({ "phone": "9845012345" }),
    ];
    let out = reconciler.reconcile_requirements(SourceTag::RequirementStore, &raw);
    let ids: Vec<&str> = out.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["9845012345-0", "9845012345-1"]);
    assert_eq!(out.records[0].source, SourceTag::RequirementStore);
}

#[test]
fn match_counts_follow_requirements_by_phone() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let clients = reconciler
        .reconcile_clients(&[SourceBatch::new(
            SourceTag::LeadCrm,
            vec![
                json!({ "mobile": "9845012345", "leadName": "Asha", "matchCount": 9 }),
                json!({ "mobile": "9000000001", "leadName": "Vikram", "matchCount": 4 }),
            ],
        )])
        .records;
    let requirements = reconciler
        .reconcile_requirements(
            SourceTag::RequirementStore,
            &[
                json!({ "phone": "+919845012345", "properties": [{ "ProjectName": "A" }, { "ProjectName": "B" }] }),
                json!({ "phone": "09845012345", "properties": [{ "ProjectName": "C" }] }),
            ],
        )
        .records;

    let clients = attach_match_counts(clients, &requirements);
    assert_eq!(clients[0].matched_count, 3);
    assert_eq!(clients[1].matched_count, 4);

    let for_asha = requirements_for_phone(&requirements, "98450 12345");
    assert_eq!(for_asha.len(), 2);
    assert!(requirements_for_phone(&requirements, "").is_empty());
}

#[test]
fn leads_reconcile_with_optional_fields() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let out = reconciler.reconcile_leads(&[
        json!({ "LeadId": "L-1", "Mobile": "9845012345", "LeadName": "Asha", "status": "New", "CreatedOn": "2024-05-01 09:30" }),
        json!({ "LeadId": "L-1", "Mobile": "9845012345", "LeadName": "Asha again" }),
        json!({ "LeadName": "No phone" }),
    ]);
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.duplicates, 1);
    assert_eq!(out.skipped, 1);
    let lead = &out.records[0];
    assert_eq!(lead.id, "L-1");
    assert_eq!(lead.email, None);
    assert_eq!(lead.status.as_deref(), Some("New"));
    assert!(lead.created_at.is_some());
}

#[test]
fn saved_requirements_fold_into_the_lead_with_the_same_phone() {
    let aliases = AliasTable::default();
    let reconciler = Reconciler::new(&aliases);
    let requirement_records = vec![
        json!({ "_id": "REQ-1", "phone": "9845012345", "name": "Asha", "properties": [{ "ProjectName": "A" }] }),
        json!({ "_id": "REQ-2", "phone": "+91 98450 12345", "name": "Asha", "properties": [{ "ProjectName": "B" }] }),
        json!({ "_id": "REQ-3", "phone": "9000000001", "name": "Vikram", "properties": [] }),
    ];
    let batches = vec![
        SourceBatch::new(
            SourceTag::LeadCrm,
            vec![
                json!({ "mobile": "9845012345", "leadName": "Asha" }),
                json!({ "id": "C-7", "mobile": "9000000001", "leadName": "Vikram" }),
            ],
        ),
        SourceBatch::new(SourceTag::RequirementStore, requirement_records.clone()),
    ];

    let clients = reconciler.reconcile_clients(&batches);
    assert_eq!(clients.duplicates, 3);
    let ids: Vec<&str> = clients.records.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["9845012345", "C-7"]);

    let requirements = reconciler
        .reconcile_requirements(SourceTag::RequirementStore, &requirement_records)
        .records;
    let clients = attach_match_counts(clients.records, &requirements);
    assert_eq!(clients[0].matched_count, 2);
    assert_eq!(clients[1].matched_count, 0);
}
