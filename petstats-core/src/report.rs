//! Report formatting utilities for PetStats outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{PetStatistics, PetsByType};

/// Render statistics as plain text.
pub fn render_text(stats: &PetStatistics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total pets: {}", stats.total_pets);
    if stats.pets_by_type.is_empty() {
        let _ = writeln!(output, "Pets by type: none");
    } else {
        let _ = writeln!(output, "Pets by type:");
        for (pet_type, count) in format_pets_by_type(&stats.pets_by_type) {
            let _ = writeln!(output, "  {pet_type}: {count}");
        }
    }
    let _ = writeln!(
        output,
        "Average visits per pet: {:.1}",
        stats.average_visits_per_pet
    );
    output
}

/// Render statistics as Markdown.
pub fn render_markdown(stats: &PetStatistics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Pet Statistics\n");
    let _ = writeln!(output, "- Total pets: {}", stats.total_pets);
    let _ = writeln!(
        output,
        "- Average visits per pet: {:.1}",
        stats.average_visits_per_pet
    );
    let _ = writeln!(output);
    if stats.pets_by_type.is_empty() {
        let _ = writeln!(output, "### Pets by type\nNo pets recorded.\n");
        return output;
    }
    let _ = writeln!(output, "### Pets by type");
    for (pet_type, count) in format_pets_by_type(&stats.pets_by_type) {
        let _ = writeln!(output, "- {pet_type}: {count}");
    }
    let _ = writeln!(output);
    output
}

/// Render any serializable payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Type counts ordered by count descending, then by label.
pub fn format_pets_by_type(pets_by_type: &PetsByType) -> Vec<(String, u64)> {
    let mut items: Vec<(String, u64)> = pets_by_type
        .iter()
        .map(|(pet_type, count)| (pet_type.clone(), *count))
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> PetStatistics {
        let mut pets_by_type = PetsByType::new();
        pets_by_type.insert("bird".to_string(), 1);
        pets_by_type.insert("cat".to_string(), 2);
        pets_by_type.insert("dog".to_string(), 3);
        pets_by_type.insert("snake".to_string(), 2);
        PetStatistics {
            total_pets: 8,
            pets_by_type,
            average_visits_per_pet: 2.0,
        }
    }

    #[test]
    fn renders_text_summary() {
        let output = render_text(&sample_stats());
        assert_eq!(
            output,
            "Total pets: 8\nPets by type:\n  dog: 3\n  cat: 2\n  snake: 2\n  bird: 1\nAverage visits per pet: 2.0\n"
        );
    }

    #[test]
    fn renders_text_for_empty_clinic() {
        let output = render_text(&PetStatistics::empty());
        assert!(output.contains("Total pets: 0"));
        assert!(output.contains("Pets by type: none"));
        assert!(output.contains("Average visits per pet: 0.0"));
    }

    #[test]
    fn renders_markdown() {
        let output = render_markdown(&sample_stats());
        assert!(output.starts_with("# Pet Statistics"));
        assert!(output.contains("- Total pets: 8"));
        assert!(output.contains("- Average visits per pet: 2.0"));
        assert!(output.contains("### Pets by type\n- dog: 3\n- cat: 2"));
    }

    #[test]
    fn renders_markdown_for_empty_clinic() {
        let output = render_markdown(&PetStatistics::empty());
        assert!(output.contains("No pets recorded."));
    }

    #[test]
    fn renders_json_payload() {
        let json = render_json(&sample_stats()).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["totalPets"], 8);
        assert_eq!(parsed["petsByType"]["dog"], 3);
        assert_eq!(parsed["averageVisitsPerPet"], 2.0);
    }

    #[test]
    fn orders_type_counts_by_count_then_name() {
        let ordered = format_pets_by_type(&sample_stats().pets_by_type);
        let labels: Vec<&str> = ordered.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["dog", "cat", "snake", "bird"]);
    }
}
