//! Built-in topic records
//!
//! Records shared by the demo driver, benches and tests. Application
//! crates declare their own with [`declare_topic!`](crate::declare_topic).

use bytemuck::{Pod, Zeroable};

/// Value the `predefined` field of a fresh [`Iso`] carries
pub const ISO_PREDEFINED: u8 = 99;

/// Sensor ISO reading
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Iso {
    /// Seconds since UNIX epoch
    pub timestamp: u64,
    pub double_val: f64,
    pub float_val: f32,
    pub iso: u8,
    /// Non-zero means true
    pub bool_val: u8,
    pub predefined: u8,
    _reserved: u8,
}

crate::declare_topic!(Iso, "iso");

impl Iso {
    /// Create a reading with the given timestamp and ISO value
    pub fn new(timestamp: u64, iso: u8) -> Self {
        Self {
            timestamp,
            iso,
            ..Self::default()
        }
    }

    pub fn flag(&self) -> bool {
        self.bool_val != 0
    }

    pub fn set_flag(&mut self, value: bool) {
        self.bool_val = u8::from(value);
    }
}

impl Default for Iso {
    fn default() -> Self {
        Self {
            timestamp: 0,
            double_val: 0.0,
            float_val: 0.0,
            iso: 0,
            bool_val: 0,
            predefined: ISO_PREDEFINED,
            _reserved: 0,
        }
    }
}
