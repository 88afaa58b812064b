//! Decoded measurement data and the raw-to-physical conversion.

use core::fmt;

use crate::error::Error;
use crate::frame::{ResponseField, FIELD_BYTES};

/// Fields in a measurement response: seven measurands plus the trailing NOx
/// slot, which this device never populates but still checksums.
pub(crate) const MEASUREMENT_FIELDS: usize = 8;

/// One decoded measurement sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Mass Concentration PM1.0 [µg/m³]
    pub pm1_0: f32,
    /// Mass Concentration PM2.5 [µg/m³]
    pub pm2_5: f32,
    /// Mass Concentration PM4.0 [µg/m³]
    pub pm4_0: f32,
    /// Mass Concentration PM10 [µg/m³]
    pub pm10_0: f32,
    /// Compensated Ambient Humidity [%RH]
    pub humidity: f32,
    /// Compensated Ambient Temperature [°C]
    pub temperature: f32,
    /// VOC Index
    pub voc_index: f32,
}

impl SensorReading {
    /// Validates every field's checksum, then scales the raw words.
    ///
    /// Fails on the first mismatching checksum; a reading is only produced
    /// when all fields validate. Humidity, temperature and VOC are signed
    /// two's-complement words, the particulate fields are unsigned.
    pub(crate) fn from_fields<E: fmt::Debug>(
        fields: &[ResponseField],
    ) -> Result<Self, Error<E>> {
        if fields.len() != MEASUREMENT_FIELDS {
            return Err(Error::Framing {
                expected: MEASUREMENT_FIELDS * FIELD_BYTES,
                actual: fields.len() * FIELD_BYTES,
            });
        }

        for (index, field) in fields.iter().enumerate() {
            let computed = field.computed_checksum();
            if computed != field.checksum {
                return Err(Error::Checksum {
                    field: index,
                    received: field.checksum,
                    computed,
                });
            }
        }

        Ok(SensorReading {
            pm1_0: f32::from(fields[0].value()) / 10.0,
            pm2_5: f32::from(fields[1].value()) / 10.0,
            pm4_0: f32::from(fields[2].value()) / 10.0,
            pm10_0: f32::from(fields[3].value()) / 10.0,
            // Raw humidity is %RH scaled by 100.
            humidity: f32::from(fields[4].signed()) / 100.0,
            temperature: f32::from(fields[5].signed()) / 200.0,
            voc_index: f32::from(fields[6].signed()) / 10.0,
            // fields[7] is the NOx slot: checksummed above, never decoded.
        })
    }
}
