//! ClientKeyExchange bodies and the DHE parameters that precede them.

use crate::enums::ProtocolVersion;
use crate::error::InvalidMessage;
use crate::msgs::base::{Payload, PayloadU16};
use crate::msgs::codec::{Codec, Reader};
use crate::msgs::ffdhe_groups::FfdheGroup;

/// An RSA-encrypted premaster secret.
///
/// SSLv3 sends the ciphertext bare, filling the rest of the message;
/// every later version puts a u16 length in front of it.
#[derive(Debug)]
pub struct EncryptedPreMasterSecret<'a> {
    ciphertext: Payload<'a>,
}

impl<'a> EncryptedPreMasterSecret<'a> {
    pub fn new(ciphertext: Payload<'a>) -> Self {
        Self { ciphertext }
    }

    pub fn read_for_version(
        r: &mut Reader<'a>,
        version: ProtocolVersion,
    ) -> Result<Self, InvalidMessage> {
        let ciphertext = match version {
            ProtocolVersion::SSLv3 => Payload::read(r),
            _ => PayloadU16::read(r)?.0,
        };
        Ok(Self { ciphertext })
    }

    pub fn encode_for_version(&self, version: ProtocolVersion, bytes: &mut Vec<u8>) {
        match version {
            ProtocolVersion::SSLv3 => self.ciphertext.encode(bytes),
            _ => PayloadU16::encode_slice(self.ciphertext.bytes(), bytes),
        }
    }

    pub fn ciphertext(&self) -> &[u8] {
        self.ciphertext.bytes()
    }
}

/// The client's DH public value, `Yc`.
#[derive(Debug)]
pub struct ClientDhParams<'a> {
    pub public: PayloadU16<'a>,
}

impl<'a> Codec<'a> for ClientDhParams<'a> {
    fn encode(&self, bytes: &mut Vec<u8>) {
        self.public.encode(bytes);
    }

    fn read(r: &mut Reader<'a>) -> Result<Self, InvalidMessage> {
        Ok(Self {
            public: PayloadU16::read(r)?,
        })
    }
}

/// The server's DHE parameters from its ServerKeyExchange.
#[allow(non_snake_case)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerDhParams {
    pub dh_p: PayloadU16<'static>,
    pub dh_g: PayloadU16<'static>,
    pub dh_Ys: PayloadU16<'static>,
}

impl ServerDhParams {
    pub fn new(group: FfdheGroup<'_>, pub_key: &[u8]) -> Self {
        Self {
            dh_p: PayloadU16::new(group.p.to_vec()),
            dh_g: PayloadU16::new(group.g.to_vec()),
            dh_Ys: PayloadU16::new(pub_key.to_vec()),
        }
    }

    pub fn as_ffdhe_group(&self) -> FfdheGroup<'_> {
        FfdheGroup::from_params_trimming_leading_zeros(self.dh_p.bytes(), self.dh_g.bytes())
    }
}

impl Codec<'_> for ServerDhParams {
    fn encode(&self, bytes: &mut Vec<u8>) {
        self.dh_p.encode(bytes);
        self.dh_g.encode(bytes);
        self.dh_Ys.encode(bytes);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, InvalidMessage> {
        Ok(Self {
            dh_p: PayloadU16::read(r)?.into_owned(),
            dh_g: PayloadU16::read(r)?.into_owned(),
            dh_Ys: PayloadU16::read(r)?.into_owned(),
        })
    }
}
