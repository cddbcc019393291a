use core::fmt;

use zeroize::Zeroize;

use crate::error::InvalidMessage;
use crate::msgs::codec::{Codec, Reader};

/// An externally length'd payload
#[derive(Clone, Eq, PartialEq)]
pub enum Payload<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl<'a> Codec<'a> for Payload<'a> {
    fn encode(&self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(self.bytes());
    }

    fn read(r: &mut Reader<'a>) -> Result<Self, InvalidMessage> {
        Ok(Self::read(r))
    }
}

impl<'a> Payload<'a> {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(bytes) => bytes,
            Self::Owned(bytes) => bytes,
        }
    }

    pub fn into_owned(self) -> Payload<'static> {
        Payload::Owned(self.into_vec())
    }

    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Self::Borrowed(bytes) => bytes.to_vec(),
            Self::Owned(bytes) => bytes,
        }
    }

    /// Borrows everything left in `r`.
    pub fn read(r: &mut Reader<'a>) -> Self {
        Self::Borrowed(r.rest())
    }
}

impl Payload<'static> {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Owned(bytes.into())
    }

    pub fn empty() -> Self {
        Self::Borrowed(&[])
    }
}

impl Zeroize for Payload<'_> {
    fn zeroize(&mut self) {
        if let Self::Owned(bytes) = self {
            bytes.zeroize();
        }
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex(f, self.bytes())
    }
}

/// An arbitrary, unknown-content, u16-length-prefixed payload.
///
/// Reading borrows the body from the wire buffer; nothing is copied.
#[derive(Clone, Eq, PartialEq)]
pub struct PayloadU16<'a>(pub Payload<'a>);

impl<'a> PayloadU16<'a> {
    pub fn new(bytes: Vec<u8>) -> PayloadU16<'static> {
        PayloadU16(Payload::Owned(bytes))
    }

    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self(Payload::Borrowed(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        self.0.bytes()
    }

    pub fn into_owned(self) -> PayloadU16<'static> {
        PayloadU16(self.0.into_owned())
    }

    /// Writes `slice` with its length prefix.
    ///
    /// Callers check `slice` fits in a u16 length first. Anything past
    /// `u16::MAX` bytes is dropped, so the prefix always matches the body.
    pub fn encode_slice(slice: &[u8], bytes: &mut Vec<u8>) {
        debug_assert!(slice.len() <= usize::from(u16::MAX));
        let len = u16::try_from(slice.len()).unwrap_or(u16::MAX);
        len.encode(bytes);
        bytes.extend_from_slice(&slice[..usize::from(len)]);
    }
}

impl<'a> Codec<'a> for PayloadU16<'a> {
    fn encode(&self, bytes: &mut Vec<u8>) {
        Self::encode_slice(self.0.bytes(), bytes);
    }

    fn read(r: &mut Reader<'a>) -> Result<Self, InvalidMessage> {
        let len = u16::read(r)? as usize;
        let mut sub = r.sub(len)?;
        Ok(Self(Payload::read(&mut sub)))
    }
}

impl fmt::Debug for PayloadU16<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Format an iterator of u8 into a hex string
pub(super) fn hex<'a>(
    f: &mut fmt::Formatter<'_>,
    payload: impl IntoIterator<Item = &'a u8>,
) -> fmt::Result {
    for b in payload {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}
