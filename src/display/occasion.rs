//! Occasion, people, subgroup and audit display

use tabled::Tabled;

use super::render_table;
use crate::audit::AuditEntry;
use crate::models::{Occasion, OccasionId, Party, Person, Subgroup};
use crate::services::PartyNames;

#[derive(Tabled)]
struct OccasionRow {
    #[tabled(rename = "Active")]
    marker: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Created")]
    created: String,
}

/// Format occasions, marking the active one
pub fn format_occasion_list(occasions: &[Occasion], active: Option<OccasionId>) -> String {
    if occasions.is_empty() {
        return "No occasions found. Create one with 'fairshare occasion create <name>'.\n"
            .to_string();
    }

    let rows = occasions
        .iter()
        .map(|o| OccasionRow {
            marker: if Some(o.id) == active { "*" } else { "" },
            name: o.name.clone(),
            id: o.id.to_string(),
            created: o.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    render_table(rows, &[])
}

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Subgroups")]
    subgroups: String,
}

/// Format the people of an occasion with the subgroups they belong to
pub fn format_people(people: &[Person], subgroups: &[Subgroup]) -> String {
    if people.is_empty() {
        return "No people in this occasion.\n".to_string();
    }

    let rows = people
        .iter()
        .map(|p| PersonRow {
            name: p.name.clone(),
            id: p.id.to_string(),
            subgroups: subgroups
                .iter()
                .filter(|s| s.has_member(p.id))
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    render_table(rows, &[])
}

#[derive(Tabled)]
struct SubgroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Members")]
    members: String,
}

pub fn format_subgroups(subgroups: &[Subgroup], names: &PartyNames) -> String {
    if subgroups.is_empty() {
        return "No subgroups in this occasion.\n".to_string();
    }

    let rows = subgroups
        .iter()
        .map(|s| SubgroupRow {
            name: s.name.clone(),
            id: s.id.to_string(),
            members: s
                .members
                .iter()
                .map(|&id| names.name(Party::Person(id)))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    render_table(rows, &[])
}

/// Format audit entries, one per line
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occasion_list_marks_active() {
        let trip = Occasion::new("Trip");
        let party = Occasion::new("Party");

        let output = format_occasion_list(&[trip.clone(), party], Some(trip.id));
        let active_line = output.lines().find(|l| l.contains("Trip")).unwrap();
        assert!(active_line.contains('*'));
        let other_line = output.lines().find(|l| l.contains("Party")).unwrap();
        assert!(!other_line.contains('*'));
    }

    #[test]
    fn test_people_with_subgroups() {
        let trip = Occasion::new("Trip");
        let alice = Person::new(trip.id, "Alice");
        let bob = Person::new(trip.id, "Bob");
        let couple = Subgroup::with_members(trip.id, "Couple", [alice.id]);

        let output = format_people(&[alice.clone(), bob], std::slice::from_ref(&couple));
        let alice_line = output.lines().find(|l| l.contains("Alice")).unwrap();
        assert!(alice_line.contains("Couple"));

        let names = PartyNames::new(&[alice], &[]);
        assert!(format_subgroups(&[couple], &names).contains("Alice"));
    }
}
