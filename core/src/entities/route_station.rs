//! Stations attached to a route, ordered by `sequence`.
//!
//! The console never re-sequences stations on its own. Picking a sequence
//! that is already taken produces a `SequenceCollision` warning and the user
//! decides what to do with the downstream stations.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStation {
    pub route_station_uuid: String,
    #[serde(default)]
    pub route_uuid: String,
    pub station_uuid: String,
    #[serde(default)]
    pub station_name: String,
    /// 1-based position along the route.
    pub sequence: u32,
    /// Kilometres from the first station.
    #[serde(default)]
    pub distance_from_start: f64,
    /// Minutes from the first station.
    #[serde(default)]
    pub estimated_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct RouteStationDraft {
    #[validate(length(min = 1))]
    pub station_uuid: String,
    #[validate(range(min = 1))]
    pub sequence: u32,
    #[validate(range(min = 0.0))]
    pub distance_from_start: f64,
    pub estimated_time: u32,
}

impl Default for RouteStationDraft {
    fn default() -> Self {
        Self {
            station_uuid: String::new(),
            sequence: 1,
            distance_from_start: 0.0,
            estimated_time: 0,
        }
    }
}

impl From<&RouteStation> for RouteStationDraft {
    fn from(rs: &RouteStation) -> Self {
        Self {
            station_uuid: rs.station_uuid.clone(),
            sequence: rs.sequence,
            distance_from_start: rs.distance_from_start,
            estimated_time: rs.estimated_time,
        }
    }
}

/// A chosen sequence is already used by another station on the route.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceCollision {
    pub sequence: u32,
    pub route_station_uuid: String,
    pub station_name: String,
}

impl SequenceCollision {
    pub fn message(&self) -> String {
        format!(
            "Sequence {} is already used by {}; later stations are not renumbered",
            self.sequence, self.station_name
        )
    }
}

/// Find a station other than `editing` that already holds `sequence`.
pub fn find_collision(
    existing: &[RouteStation],
    sequence: u32,
    editing: Option<&str>,
) -> Option<SequenceCollision> {
    existing
        .iter()
        .filter(|rs| Some(rs.route_station_uuid.as_str()) != editing)
        .find(|rs| rs.sequence == sequence)
        .map(|rs| SequenceCollision {
            sequence,
            route_station_uuid: rs.route_station_uuid.clone(),
            station_name: rs.station_name.clone(),
        })
}

/// Stations in display order. Ties keep their server order.
pub fn ordered(stations: &[RouteStation]) -> Vec<&RouteStation> {
    let mut sorted: Vec<&RouteStation> = stations.iter().collect();
    sorted.sort_by_key(|rs| rs.sequence);
    sorted
}

/// Suggested sequence for a station appended at the end.
pub fn next_sequence(stations: &[RouteStation]) -> u32 {
    stations
        .iter()
        .map(|rs| rs.sequence)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Distance and time between two consecutive stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub minutes: i64,
}

/// Consecutive legs in sequence order, derived from the cumulative
/// `distance_from_start` / `estimated_time` values.
pub fn legs(stations: &[RouteStation]) -> Vec<Leg> {
    let sorted = ordered(stations);
    sorted
        .windows(2)
        .map(|pair| Leg {
            from: pair[0].station_name.clone(),
            to: pair[1].station_name.clone(),
            distance: pair[1].distance_from_start - pair[0].distance_from_start,
            minutes: i64::from(pair[1].estimated_time) - i64::from(pair[0].estimated_time),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, name: &str, sequence: u32, km: f64, minutes: u32) -> RouteStation {
        RouteStation {
            route_station_uuid: id.to_string(),
            route_uuid: "r1".to_string(),
            station_uuid: format!("s-{id}"),
            station_name: name.to_string(),
            sequence,
            distance_from_start: km,
            estimated_time: minutes,
        }
    }

    fn line() -> Vec<RouteStation> {
        vec![
            station("c", "Depot", 3, 12.5, 30),
            station("a", "Central", 1, 0.0, 0),
            station("b", "Market", 2, 4.0, 11),
        ]
    }

    #[test]
    fn collision_on_taken_sequence() {
        let hit = find_collision(&line(), 2, None).unwrap();
        assert_eq!(hit.route_station_uuid, "b");
        assert_eq!(hit.station_name, "Market");
        assert!(hit.message().contains("Market"));
    }

    #[test]
    fn editing_station_does_not_collide_with_itself() {
        assert_eq!(find_collision(&line(), 2, Some("b")), None);
        assert_eq!(find_collision(&line(), 4, None), None);
    }

    #[test]
    fn ordering_and_next_sequence() {
        let stations = line();
        let names: Vec<&str> = ordered(&stations)
            .into_iter()
            .map(|rs| rs.station_name.as_str())
            .collect();
        assert_eq!(names, ["Central", "Market", "Depot"]);
        assert_eq!(next_sequence(&stations), 4);
        assert_eq!(next_sequence(&[]), 1);
    }

    #[test]
    fn next_sequence_stops_at_the_largest_value() {
        let stations = vec![station("z", "Terminus", u32::MAX, 30.0, 60)];
        assert_eq!(next_sequence(&stations), u32::MAX);
    }

    #[test]
    fn legs_follow_sequence() {
        let legs = legs(&line());
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, "Central");
        assert_eq!(legs[0].distance, 4.0);
        assert_eq!(legs[1].minutes, 19);
    }

    #[test]
    fn sequence_zero_is_invalid() {
        let draft = RouteStationDraft {
            station_uuid: "s1".into(),
            sequence: 0,
            ..RouteStationDraft::default()
        };
        assert!(draft.validate().unwrap_err().field_errors().contains_key("sequence"));
    }
}
