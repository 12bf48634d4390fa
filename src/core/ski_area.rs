use crate::adapters::storage::LocalStorage;
use crate::core::importer::Importer;
use crate::domain::model::{ImportReport, Lift, LiftType, Parking, ServedLift, Slope};
use crate::utils::error::{Result, SkiAreaError};
use std::collections::BTreeMap;

/// A parking is proportionate while `slots / served capacity` stays below this.
pub const DEFAULT_MAX_SLOTS_PER_SEAT: i64 = 30;

/// In-memory catalog of a ski area's lift types, lifts, slopes and parkings.
///
/// Registries are keyed by name in ordered maps so every listing comes back
/// sorted. Entities refer to each other by key and a referenced entity must be
/// registered before anything that points at it.
#[derive(Debug, Clone)]
pub struct SkiArea {
    name: String,
    max_slots_per_seat: i64,
    lift_types: BTreeMap<String, LiftType>,
    lifts: BTreeMap<String, Lift>,
    slopes: BTreeMap<String, Slope>,
    parkings: BTreeMap<String, Parking>,
    served_lifts: BTreeMap<String, Vec<ServedLift>>,
}

impl SkiArea {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_slots_per_seat: DEFAULT_MAX_SLOTS_PER_SEAT,
            lift_types: BTreeMap::new(),
            lifts: BTreeMap::new(),
            slopes: BTreeMap::new(),
            parkings: BTreeMap::new(),
            served_lifts: BTreeMap::new(),
        }
    }

    /// Overrides the proportionality threshold used by [`SkiArea::is_proportionate`].
    pub fn with_parking_ratio(mut self, max_slots_per_seat: i64) -> Self {
        self.max_slots_per_seat = max_slots_per_seat;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_slots_per_seat(&self) -> i64 {
        self.max_slots_per_seat
    }

    // Lift types

    /// Registers a lift type. Codes are unique and capacity must be positive.
    pub fn define_lift_type(&mut self, code: &str, category: &str, capacity: i32) -> Result<()> {
        if self.lift_types.contains_key(code) {
            return Err(SkiAreaError::InvalidLiftType {
                code: code.to_string(),
                reason: "code already defined".to_string(),
            });
        }
        if capacity <= 0 {
            return Err(SkiAreaError::InvalidLiftType {
                code: code.to_string(),
                reason: format!("capacity must be positive, got {}", capacity),
            });
        }

        tracing::debug!("Defining lift type {} ({}, capacity {})", code, category, capacity);
        self.lift_types.insert(
            code.to_string(),
            LiftType {
                code: code.to_string(),
                category: category.to_string(),
                capacity,
            },
        );
        Ok(())
    }

    pub fn lift_type(&self, code: &str) -> Result<&LiftType> {
        self.lift_types
            .get(code)
            .ok_or_else(|| SkiAreaError::UnknownLiftType {
                code: code.to_string(),
            })
    }

    pub fn category(&self, code: &str) -> Result<&str> {
        Ok(&self.lift_type(code)?.category)
    }

    pub fn capacity(&self, code: &str) -> Result<i32> {
        Ok(self.lift_type(code)?.capacity)
    }

    pub fn lift_type_codes(&self) -> Vec<&str> {
        self.lift_types.keys().map(String::as_str).collect()
    }

    // Lifts

    /// Creates a lift of an already defined type. An existing lift with the
    /// same name is replaced.
    pub fn create_lift(&mut self, name: &str, type_code: &str) -> Result<()> {
        self.lift_type(type_code)?;

        tracing::debug!("Creating lift {} of type {}", name, type_code);
        if self
            .lifts
            .insert(
                name.to_string(),
                Lift {
                    name: name.to_string(),
                    type_code: type_code.to_string(),
                },
            )
            .is_some()
        {
            tracing::debug!("Lift {} replaced", name);
        }
        Ok(())
    }

    pub fn lift(&self, name: &str) -> Result<&Lift> {
        self.lifts.get(name).ok_or_else(|| SkiAreaError::UnknownLift {
            name: name.to_string(),
        })
    }

    pub fn type_of(&self, lift_name: &str) -> Result<&str> {
        Ok(&self.lift(lift_name)?.type_code)
    }

    pub fn lift_names(&self) -> Vec<&str> {
        self.lifts.keys().map(String::as_str).collect()
    }

    // Slopes

    /// Creates a slope starting from an existing lift. An existing slope with
    /// the same name is replaced.
    pub fn create_slope(&mut self, name: &str, difficulty: &str, start_lift: &str) -> Result<()> {
        self.lift(start_lift)?;

        tracing::debug!("Creating slope {} ({}) from lift {}", name, difficulty, start_lift);
        self.slopes.insert(
            name.to_string(),
            Slope {
                name: name.to_string(),
                difficulty: difficulty.to_string(),
                start_lift: start_lift.to_string(),
            },
        );
        Ok(())
    }

    pub fn slope(&self, name: &str) -> Result<&Slope> {
        self.slopes.get(name).ok_or_else(|| SkiAreaError::UnknownSlope {
            name: name.to_string(),
        })
    }

    pub fn difficulty_of(&self, slope_name: &str) -> Result<&str> {
        Ok(&self.slope(slope_name)?.difficulty)
    }

    pub fn start_lift_of(&self, slope_name: &str) -> Result<&str> {
        Ok(&self.slope(slope_name)?.start_lift)
    }

    pub fn slope_names(&self) -> Vec<&str> {
        self.slopes.keys().map(String::as_str).collect()
    }

    /// Slopes whose start lift is `lift_name`, sorted by slope name.
    pub fn slopes_from(&self, lift_name: &str) -> Vec<&str> {
        self.slopes
            .values()
            .filter(|slope| slope.start_lift == lift_name)
            .map(|slope| slope.name.as_str())
            .collect()
    }

    // Parkings

    /// Creates a parking serving no lifts. Re-creating a parking replaces it
    /// and clears its served lifts.
    pub fn create_parking(&mut self, name: &str, slots: i32) {
        tracing::debug!("Creating parking {} with {} slots", name, slots);
        self.parkings.insert(
            name.to_string(),
            Parking {
                name: name.to_string(),
                slots,
            },
        );
        self.served_lifts.insert(name.to_string(), Vec::new());
    }

    pub fn parking(&self, name: &str) -> Result<&Parking> {
        self.parkings
            .get(name)
            .ok_or_else(|| SkiAreaError::UnknownParking {
                name: name.to_string(),
            })
    }

    pub fn slots_of(&self, parking_name: &str) -> Result<i32> {
        Ok(self.parking(parking_name)?.slots)
    }

    pub fn parking_names(&self) -> Vec<&str> {
        self.parkings.keys().map(String::as_str).collect()
    }

    /// Records that `parking_name` serves `lift_name`. The lift's capacity is
    /// captured now, so replacing the lift later leaves this entry as it was.
    /// Repeated calls append the lift again, and each entry counts towards the
    /// served capacity.
    pub fn add_served_lift(&mut self, parking_name: &str, lift_name: &str) -> Result<()> {
        self.parking(parking_name)?;
        let type_code = self.type_of(lift_name)?;
        let capacity = self.capacity(type_code)?;

        let served = self
            .served_lifts
            .entry(parking_name.to_string())
            .or_default();
        if served.iter().any(|lift| lift.name == lift_name) {
            tracing::warn!(
                "Lift {} is already served by parking {}, counting it again",
                lift_name,
                parking_name
            );
        }
        served.push(ServedLift {
            name: lift_name.to_string(),
            capacity,
        });
        Ok(())
    }

    /// Lifts served by the parking in insertion order.
    pub fn served_lifts(&self, parking_name: &str) -> Result<Vec<&str>> {
        Ok(self
            .served_entries(parking_name)?
            .iter()
            .map(|lift| lift.name.as_str())
            .collect())
    }

    /// Sum of the capacities captured for every lift entry served by the parking.
    pub fn served_capacity(&self, parking_name: &str) -> Result<i64> {
        Ok(self
            .served_entries(parking_name)?
            .iter()
            .map(|lift| i64::from(lift.capacity))
            .sum())
    }

    fn served_entries(&self, parking_name: &str) -> Result<&[ServedLift]> {
        self.parking(parking_name)?;
        Ok(self
            .served_lifts
            .get(parking_name)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// A parking is proportionate when `slots / served capacity`, using
    /// truncating integer division, is below the configured threshold.
    pub fn is_proportionate(&self, parking_name: &str) -> Result<bool> {
        let slots = i64::from(self.slots_of(parking_name)?);
        let total_capacity = self.served_capacity(parking_name)?;
        if total_capacity == 0 {
            return Err(SkiAreaError::NoServedCapacity {
                parking: parking_name.to_string(),
            });
        }

        let ratio = slots / total_capacity;
        tracing::debug!(
            "Parking {}: {} slots / {} seats = {}",
            parking_name,
            slots,
            total_capacity,
            ratio
        );
        Ok(ratio < self.max_slots_per_seat)
    }

    // Import

    /// Imports lift types and lifts from a file on the local file system.
    pub fn read_lifts(&mut self, path: &str) -> Result<ImportReport> {
        Importer::new(LocalStorage::default()).import(self, path)
    }
}
