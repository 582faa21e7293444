//! Big-endian integers for use in `#[repr(C, packed)]` wire structs.

#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub(crate) struct U16(u16);

impl U16 {
    pub(crate) fn get(self) -> u16 {
        u16::from_be(self.0)
    }
}

impl From<u16> for U16 {
    fn from(value: u16) -> Self {
        Self(value.to_be())
    }
}

/// TTLs are signed on the wire as far as this crate is concerned.
#[derive(Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub(crate) struct I32(i32);

impl I32 {
    pub(crate) fn get(self) -> i32 {
        i32::from_be(self.0)
    }
}

impl From<i32> for I32 {
    fn from(value: i32) -> Self {
        Self(value.to_be())
    }
}
