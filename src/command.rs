//! The fixed command set the sensor understands.

/// Commands from the datasheet command table.
///
/// Each command carries its wire opcode, the exact number of response bytes
/// the sensor will clock out, and the settle delay the sensor needs before it
/// accepts the next command. Adding a command means adding a variant here;
/// transport, framing and decoding are command-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Switch the sensor into periodic measurement mode.
    StartMeasurement,
    /// Return the sensor to idle mode.
    StopMeasurement,
    /// Fetch the latest measurement sample.
    ReadMeasurement,
}

impl Command {
    pub(crate) fn opcode(self) -> u16 {
        match self {
            Command::StartMeasurement => 0x0021,
            Command::StopMeasurement => 0x0104,
            Command::ReadMeasurement => 0x03C4,
        }
    }

    /// Exact response size in bytes; always a whole number of 3-byte fields.
    pub(crate) fn response_len(self) -> usize {
        match self {
            Command::StartMeasurement | Command::StopMeasurement => 0,
            Command::ReadMeasurement => 24,
        }
    }

    /// Time the sensor needs after this command before accepting another.
    pub(crate) fn settle_ms(self) -> u32 {
        match self {
            Command::StartMeasurement => 100,
            Command::StopMeasurement => 250,
            Command::ReadMeasurement => 70,
        }
    }

    /// Short description used in error messages and logs.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Command::StartMeasurement => "start periodic measurements",
            Command::StopMeasurement => "stop periodic measurements",
            Command::ReadMeasurement => "read sensor metrics",
        }
    }
}
