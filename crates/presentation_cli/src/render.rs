//! Text rendering of sensors and their states

use application::{Sensor, SensorState};

const UNAVAILABLE: &str = "unavailable";

/// One line per registered sensor: unique id, name and icon
pub fn sensor_list(sensors: &[Sensor]) -> String {
    if sensors.is_empty() {
        return "No stations configured".to_string();
    }

    let width = name_width(sensors.iter().map(|s| s.unique_id.as_str()));
    sensors
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  {:<10}  {}",
                s.unique_id, s.name, s.description.icon
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per sensor state: name and current value
pub fn state_table(states: &[SensorState]) -> String {
    let width = name_width(states.iter().map(|s| s.name.as_str()));
    states
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  {}",
                s.name,
                s.value.as_deref().unwrap_or(UNAVAILABLE)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use application::SensorService;
    use domain::{Snapshot, StationSet};
    use serde_json::json;

    use super::*;

    fn snapshot() -> Snapshot {
        let serde_json::Value::Object(metar) = json!({"icaoId": "KLAX", "rawOb": "METAR KLAX 151153Z"})
        else {
            unreachable!()
        };
        Snapshot::from_records(vec![metar], vec![])
    }

    #[test]
    fn empty_sensor_list() {
        assert_eq!(sensor_list(&[]), "No stations configured");
    }

    #[test]
    fn sensor_list_has_one_line_per_sensor() {
        let stations = StationSet::parse(["KLAX", "EDDF"]).unwrap();
        let service = SensorService::new("aw", &stations);

        let text = sensor_list(service.sensors());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("aw_KLAX_metar"));
        assert!(lines[0].ends_with("mdi:weather-windy"));
        assert!(lines[3].contains("EDDF TAF"));
    }

    #[test]
    fn state_table_marks_missing_values() {
        let stations = StationSet::parse(["KLAX"]).unwrap();
        let service = SensorService::new("aw", &stations);
        let snapshot = snapshot();

        let text = state_table(&service.states(Some(&snapshot)));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["KLAX METAR  METAR KLAX 151153Z", "KLAX TAF    unavailable"]);
    }
}
