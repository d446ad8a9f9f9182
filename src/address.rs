//! Hash addresses used to randomize every hash function call.

/// Describes a hash address, i.e. where a hash is calculated. It domain
/// separates each invocation of the chained hash functions.
///
/// The outer fields (layer, tree, type and OTS) are caller-configurable and
/// default to zero. The chain, hash and key-and-mask fields are owned by the
/// W-OTS+ engine, which updates them while walking the hash chains. All
/// fields are stored big-endian.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    data: [u8; Self::SIZE],
}

impl Address {
    /// Byte size of an address.
    pub const SIZE: usize = 32;

    /// Create an address with every field set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layer field.
    pub fn set_layer(&mut self, layer: u32) {
        self.data[0..4].copy_from_slice(&layer.to_be_bytes());
    }

    /// Set the tree field.
    pub fn set_tree(&mut self, tree: u64) {
        self.data[4..12].copy_from_slice(&tree.to_be_bytes());
    }

    /// Set the type field.
    pub fn set_type(&mut self, type_field: u32) {
        self.data[12..16].copy_from_slice(&type_field.to_be_bytes());
    }

    /// Set the OTS field.
    pub fn set_ots(&mut self, ots: u32) {
        self.data[16..20].copy_from_slice(&ots.to_be_bytes());
    }

    pub(crate) fn set_chain(&mut self, chain: u32) {
        self.data[20..24].copy_from_slice(&chain.to_be_bytes());
    }

    pub(crate) fn set_hash(&mut self, hash: u32) {
        self.data[24..28].copy_from_slice(&hash.to_be_bytes());
    }

    pub(crate) fn set_key_and_mask(&mut self, key_and_mask: u32) {
        self.data[28..32].copy_from_slice(&key_and_mask.to_be_bytes());
    }

    /// Return the layer field.
    pub fn layer(&self) -> u32 {
        self.read_u32(0)
    }

    /// Return the tree field.
    pub fn tree(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.data[4..12]);
        u64::from_be_bytes(buf)
    }

    /// Return the type field.
    pub fn type_field(&self) -> u32 {
        self.read_u32(12)
    }

    /// Return the OTS field.
    pub fn ots(&self) -> u32 {
        self.read_u32(16)
    }

    /// Return the address as its 32-byte representation.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.data
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.data[offset..offset + 4]);
        u32::from_be_bytes(buf)
    }
}
