// Driver roster reference data
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: u32,
    pub name: String,
    pub vehicle: String,
    pub status: String,
    pub location: String,
    pub phone: String,
}

impl DriverRecord {
    fn new(id: u32, name: &str, vehicle: &str, status: &str, location: &str, phone: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            vehicle: vehicle.to_string(),
            status: status.to_string(),
            location: location.to_string(),
            phone: phone.to_string(),
        }
    }
}

/// Roster used when no drivers are configured
pub fn default_roster() -> Vec<DriverRecord> {
    vec![
        DriverRecord::new(1, "John Driver", "Truck A123", "safe", "Highway I-95", "+1-555-0101"),
        DriverRecord::new(2, "Sarah Wilson", "Van B456", "warning", "Route 66", "+1-555-0102"),
        DriverRecord::new(3, "Mike Johnson", "Car C789", "danger", "City Center", "+1-555-0103"),
    ]
}
