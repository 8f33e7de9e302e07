//! Binary (de)serialization traits, copied in idiom from the teacher's
//! `minimal_storage::serialize_min` (`SerializeMinimal`/
//! `DeserializeFromMinimal`), but fixed-width little-endian rather than
//! varint-encoded: spec.md §4.2/§6.4 specify fixed-width fields and a
//! `u64`-length-prefixed vector encoding, not the teacher's variable-length
//! integers. That's the one deliberate divergence from the teacher's own
//! format (recorded in DESIGN.md); the trait shapes themselves are
//! unchanged.

use std::io::{self, Read, Write};

pub trait SerializeMinimal {
    type ExternalData<'s>;

    fn minimally_serialize<'a, 's: 'a, W: Write>(
        &'a self,
        write_to: &mut W,
        external_data: Self::ExternalData<'s>,
    ) -> io::Result<()>;
}

pub trait DeserializeFromMinimal: Sized {
    type ExternalData<'d>;

    fn deserialize_minimal<'a, 'd: 'a, R: Read>(
        from: &'a mut R,
        external_data: Self::ExternalData<'d>,
    ) -> io::Result<Self>;
}

macro_rules! impl_fixed_width_int {
    ($($t:ty),*) => {
        $(
            impl SerializeMinimal for $t {
                type ExternalData<'s> = ();

                fn minimally_serialize<'a, 's: 'a, W: Write>(
                    &'a self,
                    write_to: &mut W,
                    _external_data: (),
                ) -> io::Result<()> {
                    write_to.write_all(&self.to_le_bytes())
                }
            }

            impl DeserializeFromMinimal for $t {
                type ExternalData<'d> = ();

                fn deserialize_minimal<'a, 'd: 'a, R: Read>(
                    from: &'a mut R,
                    _external_data: (),
                ) -> io::Result<Self> {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    from.read_exact(&mut buf)?;
                    Ok(<$t>::from_le_bytes(buf))
                }
            }
        )*
    };
}

impl_fixed_width_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl SerializeMinimal for f32 {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, write_to: &mut W, _: ()) -> io::Result<()> {
        self.to_bits().minimally_serialize(write_to, ())
    }
}
impl DeserializeFromMinimal for f32 {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(from: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(f32::from_bits(u32::deserialize_minimal(from, ())?))
    }
}

impl SerializeMinimal for f64 {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, write_to: &mut W, _: ()) -> io::Result<()> {
        self.to_bits().minimally_serialize(write_to, ())
    }
}
impl DeserializeFromMinimal for f64 {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(from: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(f64::from_bits(u64::deserialize_minimal(from, ())?))
    }
}

impl SerializeMinimal for bool {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, write_to: &mut W, _: ()) -> io::Result<()> {
        (*self as u8).minimally_serialize(write_to, ())
    }
}
impl DeserializeFromMinimal for bool {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(from: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(u8::deserialize_minimal(from, ())? != 0)
    }
}

/// Size-prefixed vector: `u64 len` then `len` fixed-size elements
/// (spec.md §4.2).
impl<T: SerializeMinimal> SerializeMinimal for Vec<T>
where
    for<'a> T::ExternalData<'a>: Copy,
{
    type ExternalData<'d> = T::ExternalData<'d>;

    fn minimally_serialize<'a, 's: 'a, W: Write>(
        &'a self,
        write_to: &mut W,
        external_data: Self::ExternalData<'s>,
    ) -> io::Result<()> {
        (self.len() as u64).minimally_serialize(write_to, ())?;
        for item in self.iter() {
            item.minimally_serialize(write_to, external_data)?;
        }
        Ok(())
    }
}

impl<T: DeserializeFromMinimal> DeserializeFromMinimal for Vec<T>
where
    for<'a> T::ExternalData<'a>: Copy,
{
    type ExternalData<'d> = T::ExternalData<'d>;

    fn deserialize_minimal<'a, 'd: 'a, R: Read>(
        from: &'a mut R,
        external_data: Self::ExternalData<'d>,
    ) -> io::Result<Self> {
        let len = u64::deserialize_minimal(from, ())? as usize;
        let mut vec = Vec::with_capacity(len.min(1 << 20));
        for _ in 0..len {
            vec.push(T::deserialize_minimal(from, external_data)?);
        }
        Ok(vec)
    }
}

pub fn assert_roundtrip<'a, T>(item: T, ser: T::ExternalData<'a>, der: T::ExternalData<'a>)
where
    T: PartialEq + std::fmt::Debug + SerializeMinimal + DeserializeFromMinimal,
{
    let mut buf = Vec::new();
    item.minimally_serialize(&mut buf, ser).unwrap();
    let round = T::deserialize_minimal(&mut &buf[..], der).unwrap();
    assert_eq!(item, round);
}
