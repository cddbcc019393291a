//! Finite field Diffie-Hellman groups from
//! [RFC 7919 Appendix A](https://datatracker.ietf.org/doc/html/rfc7919#appendix-A).

use crate::msgs::enums::NamedGroup;

/// Parameters of an FFDHE group, with big-endian byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FfdheGroup<'a> {
    /// The prime modulus.
    pub p: &'a [u8],
    /// The generator.
    pub g: &'a [u8],
}

impl FfdheGroup<'static> {
    /// Return the `FfdheGroup` corresponding to the provided `NamedGroup`,
    /// if this crate carries its parameters.
    pub fn from_named_group(named_group: NamedGroup) -> Option<Self> {
        match named_group {
            NamedGroup::FFDHE2048 => Some(FFDHE2048),
            NamedGroup::FFDHE3072 => Some(FFDHE3072),
            NamedGroup::FFDHE4096 => Some(FFDHE4096),
            _ => None,
        }
    }
}

impl<'a> FfdheGroup<'a> {
    /// Return the `NamedGroup` for the `FfdheGroup` if it represents one.
    pub fn named_group(&self) -> Option<NamedGroup> {
        match *self {
            FFDHE2048 => Some(NamedGroup::FFDHE2048),
            FFDHE3072 => Some(NamedGroup::FFDHE3072),
            FFDHE4096 => Some(NamedGroup::FFDHE4096),
            _ => None,
        }
    }

    /// Construct an `FfdheGroup` from `p` and `g` as received on the wire.
    ///
    /// Leading zero bytes are dropped so that a padded encoding of a named
    /// group still compares equal to it.
    pub fn from_params_trimming_leading_zeros(p: &'a [u8], g: &'a [u8]) -> Self {
        fn trim_leading_zeros(buf: &[u8]) -> &[u8] {
            let start = buf
                .iter()
                .position(|&b| b != 0)
                .unwrap_or(buf.len());
            &buf[start..]
        }

        FfdheGroup {
            p: trim_leading_zeros(p),
            g: trim_leading_zeros(g),
        }
    }

    /// Length of the modulus in bytes.
    ///
    /// Public values in this group are never longer than this.
    pub fn modulus_len(&self) -> usize {
        self.p.len()
    }
}

/// FFDHE2048 group defined in [RFC 7919 Appendix A.1]
///
/// [RFC 7919 Appendix A.1]: https://datatracker.ietf.org/doc/html/rfc7919#appendix-A.1
pub const FFDHE2048: FfdheGroup<'static> = FfdheGroup {
    p: include_bytes!("ffdhe_groups/ffdhe2048-modulus.bin"),
    g: &[2],
};

/// FFDHE3072 group defined in [RFC 7919 Appendix A.2]
///
/// [RFC 7919 Appendix A.2]: https://datatracker.ietf.org/doc/html/rfc7919#appendix-A.2
pub const FFDHE3072: FfdheGroup<'static> = FfdheGroup {
    p: include_bytes!("ffdhe_groups/ffdhe3072-modulus.bin"),
    g: &[2],
};

/// FFDHE4096 group defined in [RFC 7919 Appendix A.3]
///
/// [RFC 7919 Appendix A.3]: https://datatracker.ietf.org/doc/html/rfc7919#appendix-A.3
pub const FFDHE4096: FfdheGroup<'static> = FfdheGroup {
    p: include_bytes!("ffdhe_groups/ffdhe4096-modulus.bin"),
    g: &[2],
};
