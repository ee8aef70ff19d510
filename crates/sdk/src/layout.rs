//! Fixed little-endian binary layout shared by instruction payloads and
//! program accounts: an 8-byte discriminator followed by typed fields.
//!
//! Integers are little-endian; strings and sequences carry a `u32`
//! length prefix.

use bytes::{Buf, BufMut};
use solana_sdk::pubkey::{Pubkey, PUBKEY_BYTES};

/// Length of a discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// An 8-byte value identifying an operation or an account type.
pub type Discriminator = [u8; DISCRIMINATOR_LEN];

/// Kind of a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `u8`.
    U8,
    /// `bool`, encoded as one byte.
    Bool,
    /// `u64`.
    U64,
    /// `i64`.
    I64,
    /// 32-byte public key.
    Pubkey,
    /// Length-prefixed UTF-8 string.
    String,
    /// Length-prefixed sequence of public keys.
    Pubkeys,
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// `u8`.
    U8(u8),
    /// `bool`.
    Bool(bool),
    /// `u64`.
    U64(u64),
    /// `i64`.
    I64(i64),
    /// Public key.
    Pubkey(Pubkey),
    /// String.
    String(String),
    /// Sequence of public keys.
    Pubkeys(Vec<Pubkey>),
}

impl Field {
    /// Returns the kind of this field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::U8(_) => FieldKind::U8,
            Self::Bool(_) => FieldKind::Bool,
            Self::U64(_) => FieldKind::U64,
            Self::I64(_) => FieldKind::I64,
            Self::Pubkey(_) => FieldKind::Pubkey,
            Self::String(_) => FieldKind::String,
            Self::Pubkeys(_) => FieldKind::Pubkeys,
        }
    }

    /// Number of bytes this field occupies once encoded.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::U8(_) | Self::Bool(_) => 1,
            Self::U64(_) | Self::I64(_) => 8,
            Self::Pubkey(_) => PUBKEY_BYTES,
            Self::String(s) => 4 + s.len(),
            Self::Pubkeys(keys) => 4 + keys.len() * PUBKEY_BYTES,
        }
    }

    fn encode_into(&self, buf: &mut impl BufMut) -> crate::Result<()> {
        match self {
            Self::U8(value) => buf.put_u8(*value),
            Self::Bool(value) => buf.put_u8(u8::from(*value)),
            Self::U64(value) => buf.put_u64_le(*value),
            Self::I64(value) => buf.put_i64_le(*value),
            Self::Pubkey(pubkey) => buf.put_slice(pubkey.as_ref()),
            Self::String(s) => {
                buf.put_u32_le(length_prefix(s.len(), "string length exceeds u32")?);
                buf.put_slice(s.as_bytes());
            }
            Self::Pubkeys(keys) => {
                buf.put_u32_le(length_prefix(keys.len(), "sequence length exceeds u32")?);
                for key in keys {
                    buf.put_slice(key.as_ref());
                }
            }
        }
        Ok(())
    }
}

/// Convert a length to its `u32` prefix.
pub fn length_prefix(len: usize, what: &'static str) -> crate::Result<u32> {
    u32::try_from(len).map_err(|_| crate::Error::EncodingOverflow(what))
}

/// A discriminator followed by an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    discriminator: Discriminator,
    fields: Vec<Field>,
}

impl Payload {
    /// Create a payload without fields.
    pub fn new(discriminator: Discriminator) -> Self {
        Self {
            discriminator,
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the discriminator.
    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    /// Returns the fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Consume the payload and return the fields.
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Number of bytes of the encoded payload.
    pub fn encoded_len(&self) -> usize {
        DISCRIMINATOR_LEN + self.fields.iter().map(Field::encoded_len).sum::<usize>()
    }

    /// Encode the payload.
    pub fn encode(&self) -> crate::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.put_slice(&self.discriminator);
        for field in &self.fields {
            field.encode_into(&mut buf)?;
        }
        Ok(buf)
    }

    /// Decode a payload with the expected discriminator and field kinds.
    ///
    /// Trailing bytes are rejected.
    pub fn decode(
        data: &[u8],
        discriminator: &Discriminator,
        kinds: &[FieldKind],
    ) -> crate::Result<Self> {
        let mut reader = Reader::new(data);
        reader.discriminator(discriminator)?;
        let fields = kinds
            .iter()
            .map(|kind| reader.read(*kind))
            .collect::<crate::Result<Vec<_>>>()?;
        if reader.remaining() != 0 {
            return Err(crate::Error::decode(format!(
                "{} trailing bytes",
                reader.remaining()
            )));
        }
        Ok(Self {
            discriminator: *discriminator,
            fields,
        })
    }
}

/// Cursor over encoded data.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Create a reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self { buf: data }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, len: usize, what: &str) -> crate::Result<()> {
        if self.buf.remaining() < len {
            Err(crate::Error::decode(format!(
                "not enough bytes for {what}: need {len}, have {}",
                self.buf.remaining()
            )))
        } else {
            Ok(())
        }
    }

    /// Read and check the discriminator.
    pub fn discriminator(&mut self, expected: &Discriminator) -> crate::Result<()> {
        self.ensure(DISCRIMINATOR_LEN, "discriminator")?;
        let (found, rest) = self.buf.split_at(DISCRIMINATOR_LEN);
        if found != expected {
            return Err(crate::Error::decode(format!(
                "discriminator mismatch: expected {expected:?}, found {found:?}"
            )));
        }
        self.buf = rest;
        Ok(())
    }

    /// Read a field of the given kind.
    pub fn read(&mut self, kind: FieldKind) -> crate::Result<Field> {
        Ok(match kind {
            FieldKind::U8 => Field::U8(self.u8()?),
            FieldKind::Bool => Field::Bool(self.bool()?),
            FieldKind::U64 => Field::U64(self.u64()?),
            FieldKind::I64 => Field::I64(self.i64()?),
            FieldKind::Pubkey => Field::Pubkey(self.pubkey()?),
            FieldKind::String => Field::String(self.string()?),
            FieldKind::Pubkeys => Field::Pubkeys(self.pubkeys()?),
        })
    }

    /// Read a `u8`.
    pub fn u8(&mut self) -> crate::Result<u8> {
        self.ensure(1, "u8")?;
        Ok(self.buf.get_u8())
    }

    /// Read a `bool`.
    pub fn bool(&mut self) -> crate::Result<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(crate::Error::decode(format!("invalid bool value: {other}"))),
        }
    }

    /// Read a `u64`.
    pub fn u64(&mut self) -> crate::Result<u64> {
        self.ensure(8, "u64")?;
        Ok(self.buf.get_u64_le())
    }

    /// Read an `i64`.
    pub fn i64(&mut self) -> crate::Result<i64> {
        self.ensure(8, "i64")?;
        Ok(self.buf.get_i64_le())
    }

    /// Read a public key.
    pub fn pubkey(&mut self) -> crate::Result<Pubkey> {
        self.ensure(PUBKEY_BYTES, "pubkey")?;
        let mut bytes = [0u8; PUBKEY_BYTES];
        self.buf.copy_to_slice(&mut bytes);
        Ok(Pubkey::new_from_array(bytes))
    }

    fn len_prefix(&mut self, what: &str) -> crate::Result<usize> {
        self.ensure(4, what)?;
        usize::try_from(self.buf.get_u32_le())
            .map_err(|_| crate::Error::decode(format!("{what} length does not fit usize")))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn string(&mut self) -> crate::Result<String> {
        let len = self.len_prefix("string")?;
        self.ensure(len, "string bytes")?;
        let (bytes, rest) = self.buf.split_at(len);
        let s = std::str::from_utf8(bytes)
            .map_err(|err| crate::Error::decode(format!("invalid UTF-8 string: {err}")))?
            .to_string();
        self.buf = rest;
        Ok(s)
    }

    /// Read a length-prefixed sequence of public keys.
    pub fn pubkeys(&mut self) -> crate::Result<Vec<Pubkey>> {
        let len = self.len_prefix("sequence")?;
        let bytes = len
            .checked_mul(PUBKEY_BYTES)
            .ok_or_else(|| crate::Error::decode("sequence length overflow"))?;
        self.ensure(bytes, "sequence elements")?;
        (0..len).map(|_| self.pubkey()).collect()
    }
}
