//! Hover tooltip text

use whr_core::Field;
use whr_data::CountryRecord;

/// Tooltip lines for a record: the country name, then every field
pub fn tooltip_lines(record: &CountryRecord) -> Vec<String> {
    let mut lines = Vec::with_capacity(Field::ALL.len() + 1);
    lines.push(format!("Country: {}", record.name));
    lines.extend(Field::ALL.into_iter().map(|field| {
        let value = record
            .value(field)
            .map(|v| field.format_value(v))
            .unwrap_or_else(|| "n/a".to_string());
        format!("{}: {}", field.label(), value)
    }));
    lines
}

pub fn tooltip_text(record: &CountryRecord) -> String {
    tooltip_lines(record).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use whr_core::CountryId;

    #[test]
    fn test_tooltip_lists_every_field() {
        let record = CountryRecord {
            id: CountryId::new("ISL"),
            name: "Iceland".to_string(),
            geometry: None,
            values: [(Field::LadderScore, 7.53), (Field::Population, 360_000.0)]
                .into_iter()
                .collect(),
        };

        let lines = tooltip_lines(&record);
        assert_eq!(lines.len(), Field::ALL.len() + 1);
        assert_eq!(lines[0], "Country: Iceland");
        assert!(lines.contains(&"Happiness Score: 7.53".to_string()));
        assert!(lines.contains(&"Population: 360,000".to_string()));
        assert!(lines.contains(&"Generosity: n/a".to_string()));
    }
}
