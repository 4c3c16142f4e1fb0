use crate::io::InputStream;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    UnsignedInteger,
    NegativeInteger,
    Bytes,
    Text,
    Array,
    Map,
    Tag,
    Boolean,
    Null,
    Undefined,
    SimpleValue,
    Float,
    Double,
    Break,
    EndOfStream,
    SyntaxError,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Reserved additional-information value {0}")]
    UnknownAdditionalInfo(u8),

    #[error("Indefinite length on a major type with no indefinite form")]
    NotAnIndefiniteType,

    #[error("Invalid simple value {0}")]
    BadSimpleValue(u8),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    AdditionalInfo,
    WaitAvailable,
    ReadValue,
    DetermineType,
}

pub struct Reader<I> {
    input: I,
    state: State,
    major: u8,
    addl: u8,
    value: u64,
    pending: usize,
    error: Option<SyntaxError>,
}

impl<I: InputStream> Reader<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            state: State::Start,
            major: 0,
            addl: 0,
            value: 0,
            pending: 0,
            error: None,
        }
    }

    pub fn into_inner(self) -> I {
        self.input
    }

    // Returns EndOfStream whenever the stream cannot yet satisfy the
    // current header, preserving intermediate state so the call can simply
    // be retried as bytes arrive
    pub fn read_type(&mut self) -> DataType {
        // Read the initial byte
        if self.state == State::Start {
            self.value = 0;
            self.error = None;
            let Some(initial) = self.input.read() else {
                self.major = 0;
                self.addl = 0;
                self.pending = 0;
                return DataType::EndOfStream;
            };
            self.major = initial >> 5;
            self.addl = initial & 0x1F;
            self.state = State::AdditionalInfo;
        }

        // Note how many argument bytes the additional info calls for
        if self.state == State::AdditionalInfo {
            self.pending = 0;
            match self.addl {
                24 => {
                    self.pending = 1;
                    self.state = State::WaitAvailable;
                }
                25 => {
                    self.pending = 2;
                    self.state = State::WaitAvailable;
                }
                26 => {
                    self.pending = 4;
                    self.state = State::WaitAvailable;
                }
                27 => {
                    self.pending = 8;
                    self.state = State::WaitAvailable;
                }
                28..=30 => {
                    self.error = Some(SyntaxError::UnknownAdditionalInfo(self.addl));
                    self.state = State::Start;
                    return DataType::SyntaxError;
                }
                31 => {
                    // Integers and tags have no indefinite form
                    if matches!(self.major, 0 | 1 | 6) {
                        self.error = Some(SyntaxError::NotAnIndefiniteType);
                        self.state = State::Start;
                        return DataType::SyntaxError;
                    }
                    self.state = State::ReadValue;
                }
                _ => self.state = State::ReadValue,
            }
        }

        // Hold until the whole argument can be read in one pass
        if self.state == State::WaitAvailable {
            if self.input.available() < self.pending {
                return DataType::EndOfStream;
            }
            self.state = State::ReadValue;
        }

        if self.state == State::ReadValue {
            self.value = match self.addl {
                // Availability was ensured before leaving WaitAvailable
                24..=27 => {
                    let mut value = 0;
                    for _ in 0..self.pending {
                        value = (value << 8) | u64::from(self.input.read().unwrap_or(0));
                    }
                    value
                }
                31 => 0, // Indefinite length or break
                addl => addl as u64,
            };
            self.state = State::DetermineType;
        }

        if self.state == State::DetermineType {
            self.state = State::Start;
            return match self.major {
                0 => DataType::UnsignedInteger,
                1 => DataType::NegativeInteger,
                2 => DataType::Bytes,
                3 => DataType::Text,
                4 => DataType::Array,
                5 => DataType::Map,
                6 => DataType::Tag,
                _ => match self.addl {
                    20 | 21 => {
                        self.value = 0;
                        DataType::Boolean
                    }
                    22 => {
                        self.value = 0;
                        DataType::Null
                    }
                    23 => {
                        self.value = 0;
                        DataType::Undefined
                    }
                    24 => {
                        if self.value < 32 {
                            self.error = Some(SyntaxError::BadSimpleValue(self.value as u8));
                            return DataType::SyntaxError;
                        }
                        DataType::SimpleValue
                    }
                    25 | 26 => DataType::Float,
                    27 => DataType::Double,
                    31 => {
                        self.value = 0;
                        DataType::Break
                    }
                    _ => DataType::SimpleValue,
                },
            };
        }

        DataType::EndOfStream
    }

    pub fn length(&self) -> u64 {
        self.value
    }

    pub fn is_indefinite_length(&self) -> bool {
        matches!(self.major, 2..=5) && self.addl == 31
    }

    pub fn raw_value(&self) -> u64 {
        self.value
    }

    pub fn syntax_error(&self) -> Option<SyntaxError> {
        self.error
    }

    pub fn unsigned_integer(&self) -> u64 {
        if self.major == 0 {
            self.value
        } else {
            0
        }
    }

    pub fn negative_integer(&self) -> i64 {
        if self.major == 1 {
            // -1 - argument; the extreme end of the wire range wraps past
            // the signed domain
            (!self.value) as i64
        } else {
            0
        }
    }

    pub fn tag(&self) -> u64 {
        if self.major == 6 {
            self.value
        } else {
            0
        }
    }

    pub fn simple_value(&self) -> u8 {
        if self.major == 7 {
            self.value as u8
        } else {
            0
        }
    }

    pub fn boolean(&self) -> bool {
        // The redundant one-byte form carrying 21 also reads as true
        self.major == 7 && (self.addl == 21 || (self.addl == 24 && self.value == 21))
    }

    pub fn float(&self) -> f32 {
        self.double() as f32
    }

    pub fn double(&self) -> f64 {
        if self.major != 7 {
            return 0.0;
        }
        match self.addl {
            25 => f64::from(half::f16::from_bits(self.value as u16)),
            26 => f64::from(f32::from_bits(self.value as u32)),
            27 => f64::from_bits(self.value),
            _ => 0.0,
        }
    }

    pub fn read_bytes(&mut self, dst: &mut [u8]) -> usize {
        self.input.read_bytes(dst)
    }

    // Destructive; must not be interleaved with a partially read header
    pub fn is_well_formed(&mut self) -> bool {
        crate::wellformed::is_well_formed(&mut self.input)
    }
}
