//! Typed decode/encode of the comma-separated driver and ride lines.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use super::Line;
use crate::entities::{ride_id_timestamp, Driver, DriverRegistration, Ride, Rider, RiderRegistration};
use crate::error::Error;
use crate::places::PlaceRegistry;

pub trait Record: Sized {
    const KIND: &'static str;
    const FIELDS: usize;

    fn from_fields(fields: &StringRecord) -> Result<Self, Error>;
    fn to_fields(&self) -> Vec<String>;

    fn decode(line: &str) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let fields = match reader.records().next() {
            Some(fields) => fields?,
            None => return Err(Error::corrupt_record_error("empty line")),
        };

        if fields.len() != Self::FIELDS {
            return Err(Error::corrupt_record_error(format!(
                "{} record has {} fields, expected {}",
                Self::KIND,
                fields.len(),
                Self::FIELDS
            )));
        }

        Self::from_fields(&fields)
    }

    fn encode(&self) -> Result<String, Error> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.write_record(self.to_fields())?;

        let bytes = writer
            .into_inner()
            .map_err(|err| Error::corrupt_record_error(err.error()))?;
        let line = String::from_utf8(bytes).map_err(Error::corrupt_record_error)?;

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

/// Whether a field would break the one-record-per-line layout.
pub fn contains_separator(field: &str) -> bool {
    field.contains(&[',', '\n', '\r'][..])
}

/// Decodes every non-blank line, skipping and logging the ones that fail.
///
/// Yields `(line index, record)` pairs so callers can map back to the raw line.
pub fn decode_lines<'a, T: Record + 'a>(
    lines: &'a [Line],
) -> impl Iterator<Item = (usize, T)> + 'a {
    lines.iter().enumerate().filter_map(|(index, line)| {
        if line.is_blank() {
            return None;
        }

        match line.as_str().and_then(T::decode) {
            Ok(record) => Some((index, record)),
            Err(err) => {
                tracing::warn!(line = index + 1, kind = T::KIND, "skipping record: {}", err);
                None
            }
        }
    })
}

fn non_empty(fields: &StringRecord, index: usize, name: &str) -> Result<String, Error> {
    match fields.get(index) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(Error::corrupt_record_error(format!("{} is empty", name))),
    }
}

fn raw(fields: &StringRecord, index: usize) -> String {
    fields.get(index).unwrap_or_default().to_string()
}

/// `username, password, name, age, phoneNumber, vehicleNumber, vehicleType, locationName`
///
/// Only the username, vehicle type and location matter to dispatch; the rest
/// is carried through rewrites untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverRecord {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: u32,
    pub phone_number: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub location: String,
}

impl Record for DriverRecord {
    const KIND: &'static str = "driver";
    const FIELDS: usize = 8;

    fn from_fields(fields: &StringRecord) -> Result<Self, Error> {
        let age = raw(fields, 3);
        let age = age
            .trim()
            .parse()
            .map_err(|_| Error::corrupt_record_error(format!("age {:?} is not a number", age)))?;

        Ok(Self {
            username: non_empty(fields, 0, "username")?,
            password: raw(fields, 1),
            name: raw(fields, 2),
            age,
            phone_number: raw(fields, 4),
            vehicle_number: raw(fields, 5),
            vehicle_type: non_empty(fields, 6, "vehicle type")?,
            location: non_empty(fields, 7, "location")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.password.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.phone_number.clone(),
            self.vehicle_number.clone(),
            self.vehicle_type.clone(),
            self.location.clone(),
        ]
    }
}

impl DriverRecord {
    /// Resolves the stored location through the registry.
    pub fn to_driver(&self, places: &PlaceRegistry) -> Result<Driver, Error> {
        let location = places.find(&self.location).ok_or_else(|| {
            Error::corrupt_record_error(format!(
                "driver {:?} is at unknown place {:?}",
                self.username, self.location
            ))
        })?;

        Ok(Driver::new(
            self.username.clone(),
            self.name.clone(),
            self.vehicle_type.clone(),
            location.clone(),
        ))
    }
}

impl From<DriverRegistration> for DriverRecord {
    fn from(registration: DriverRegistration) -> Self {
        Self {
            username: registration.username,
            password: registration.password,
            name: registration.name,
            age: registration.age,
            phone_number: registration.phone_number,
            vehicle_number: registration.vehicle_number,
            vehicle_type: registration.vehicle_type,
            location: registration.location,
        }
    }
}

/// `username, password, name, age, phoneNumber`
#[derive(Clone, Debug, PartialEq)]
pub struct RiderRecord {
    pub username: String,
    pub password: String,
    pub name: String,
    pub age: u32,
    pub phone_number: String,
}

impl Record for RiderRecord {
    const KIND: &'static str = "rider";
    const FIELDS: usize = 5;

    fn from_fields(fields: &StringRecord) -> Result<Self, Error> {
        let age = raw(fields, 3);
        let age = age
            .trim()
            .parse()
            .map_err(|_| Error::corrupt_record_error(format!("age {:?} is not a number", age)))?;

        Ok(Self {
            username: non_empty(fields, 0, "username")?,
            password: raw(fields, 1),
            name: raw(fields, 2),
            age,
            phone_number: raw(fields, 4),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.password.clone(),
            self.name.clone(),
            self.age.to_string(),
            self.phone_number.clone(),
        ]
    }
}

impl RiderRecord {
    pub fn to_rider(&self) -> Rider {
        Rider::new(
            self.username.clone(),
            self.name.clone(),
            self.age,
            self.phone_number.clone(),
        )
    }
}

impl From<RiderRegistration> for RiderRecord {
    fn from(registration: RiderRegistration) -> Self {
        Self {
            username: registration.username,
            password: registration.password,
            name: registration.name,
            age: registration.age,
            phone_number: registration.phone_number,
        }
    }
}

/// `rideId, riderUsername, driverUsername, pickupName, dropoffName, fare, vehicleType`
#[derive(Clone, Debug, PartialEq)]
pub struct RideRecord {
    pub ride_id: String,
    pub rider: String,
    pub driver: String,
    pub pickup: String,
    pub dropoff: String,
    pub fare: f64,
    pub vehicle_type: String,
}

impl Record for RideRecord {
    const KIND: &'static str = "ride";
    const FIELDS: usize = 7;

    fn from_fields(fields: &StringRecord) -> Result<Self, Error> {
        let fare = raw(fields, 5);
        let fare: f64 = fare
            .trim()
            .parse()
            .map_err(|_| Error::corrupt_record_error(format!("fare {:?} is not a number", fare)))?;

        if !fare.is_finite() || fare < 0.0 {
            return Err(Error::corrupt_record_error(format!("fare {} is out of range", fare)));
        }

        Ok(Self {
            ride_id: non_empty(fields, 0, "ride id")?,
            rider: non_empty(fields, 1, "rider")?,
            driver: non_empty(fields, 2, "driver")?,
            pickup: non_empty(fields, 3, "pickup")?,
            dropoff: non_empty(fields, 4, "dropoff")?,
            fare,
            vehicle_type: non_empty(fields, 6, "vehicle type")?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.ride_id.clone(),
            self.rider.clone(),
            self.driver.clone(),
            self.pickup.clone(),
            self.dropoff.clone(),
            self.fare.to_string(),
            self.vehicle_type.clone(),
        ]
    }
}

impl From<&Ride> for RideRecord {
    fn from(ride: &Ride) -> Self {
        Self {
            ride_id: ride.id.clone(),
            rider: ride.rider_id.clone(),
            driver: ride.driver_id.clone(),
            pickup: ride.pickup.name.clone(),
            dropoff: ride.dropoff.name.clone(),
            fare: ride.fare,
            vehicle_type: ride.vehicle_class.clone(),
        }
    }
}

impl RideRecord {
    pub fn into_ride(self, places: &PlaceRegistry) -> Result<Ride, Error> {
        let pickup = places
            .find(&self.pickup)
            .ok_or_else(|| Error::corrupt_record_error(format!("unknown pickup {:?}", self.pickup)))?
            .clone();
        let dropoff = places
            .find(&self.dropoff)
            .ok_or_else(|| {
                Error::corrupt_record_error(format!("unknown dropoff {:?}", self.dropoff))
            })?
            .clone();

        Ok(Ride {
            created_at: ride_id_timestamp(&self.ride_id),
            id: self.ride_id,
            rider_id: self.rider,
            driver_id: self.driver,
            pickup,
            dropoff,
            fare: self.fare,
            vehicle_class: self.vehicle_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVER_LINE: &str = "asha,secret,Asha Rao,34,5550100,KA01AB1234,Car,Airport";

    #[test]
    fn driver_line_decodes_every_field() {
        let record = DriverRecord::decode(DRIVER_LINE).unwrap();

        assert_eq!(record.username, "asha");
        assert_eq!(record.age, 34);
        assert_eq!(record.vehicle_type, "Car");
        assert_eq!(record.location, "Airport");
        assert_eq!(record.encode().unwrap(), DRIVER_LINE);
    }

    #[test]
    fn driver_line_with_wrong_field_count_is_corrupt() {
        let err = DriverRecord::decode("asha,secret,Asha Rao,34,Car,Airport").unwrap_err();
        assert!(err.is_corrupt_record_error());
    }

    #[test]
    fn driver_line_with_non_numeric_age_is_corrupt() {
        let err = DriverRecord::decode("asha,secret,Asha,old,555,KA01,Car,Airport").unwrap_err();
        assert!(err.is_corrupt_record_error());
    }

    #[test]
    fn driver_at_unknown_place_does_not_resolve() {
        let record = DriverRecord::decode("asha,secret,Asha,34,555,KA01,Car,Lighthouse").unwrap();
        let err = record.to_driver(&PlaceRegistry::default()).unwrap_err();

        assert!(err.is_corrupt_record_error());
    }

    #[test]
    fn ride_line_keeps_fare_exactly() {
        let line = "1700000000-42,rider,asha,Downtown,Airport,15,Car";
        let record = RideRecord::decode(line).unwrap();

        assert_eq!(record.fare, 15.0);
        assert_eq!(record.encode().unwrap(), line);

        let ride = record.into_ride(&PlaceRegistry::default()).unwrap();
        assert_eq!(ride.dropoff.name, "Airport");
        assert!(ride.created_at.is_some());
    }

    #[test]
    fn ride_line_with_bad_fare_is_corrupt() {
        for line in [
            "1-2,rider,asha,Downtown,Airport,free,Car",
            "1-2,rider,asha,Downtown,Airport,-3,Car",
            "1-2,rider,asha,Downtown,Airport,NaN,Car",
        ] {
            assert!(RideRecord::decode(line).unwrap_err().is_corrupt_record_error(), "{}", line);
        }
    }

    #[test]
    fn decode_lines_skips_blank_and_corrupt_lines() {
        let lines = vec![
            Line::from("1-1,a,d,Downtown,Mall,8,Car"),
            Line::from(""),
            Line::from("garbage"),
            Line::from_bytes(&b"1-9,\xff,d,Mall,Airport,15,Bike"[..]),
            Line::from("1-2,b,d,Mall,Airport,15,Bike"),
        ];

        let decoded: Vec<(usize, RideRecord)> = decode_lines(&lines).collect();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].0, 0);
        assert_eq!(decoded[1].0, 4);
    }

    #[test]
    fn rider_line_round_trips_without_vehicle_fields() {
        let line = "ana,secret,Ana Ruiz,29,5550199";
        let record = RiderRecord::decode(line).unwrap();

        assert_eq!(record.age, 29);
        assert_eq!(record.encode().unwrap(), line);
        assert_eq!(record.to_rider().id(), "ana");

        assert!(RiderRecord::decode(DRIVER_LINE).unwrap_err().is_corrupt_record_error());
    }

    #[test]
    fn separators_are_detected_in_any_position() {
        assert!(!contains_separator("Train Station"));
        assert!(contains_separator("a,b"));
        assert!(contains_separator("ana\nx"));
        assert!(contains_separator("\r"));
    }
}
