use std::{
    collections::HashMap,
    io::{self, Read, Write},
};

use rel_geom::MultiPolygon;
use rel_storage::{DeserializeFromMinimal, SerializeMinimal};

use crate::{BoxId, BoxIdList};

impl SerializeMinimal for BoxId {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.raw().minimally_serialize(w, ())
    }
}
impl DeserializeFromMinimal for BoxId {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(BoxId(i32::deserialize_minimal(r, ())?))
    }
}

impl SerializeMinimal for BoxIdList {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        let ids: Vec<BoxId> = self.iter().collect();
        ids.minimally_serialize(w, ())
    }
}
impl DeserializeFromMinimal for BoxIdList {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        let ids = Vec::<BoxId>::deserialize_minimal(r, ())?;
        let mut list = BoxIdList::new();
        for id in ids {
            list.push(id);
        }
        Ok(list)
    }
}

/// Per-tile clip map (spec.md §3's `cutouts`), serialized as a length-
/// prefixed list of `(tile, MultiPolygon)` pairs.
pub fn write_cutouts<W: Write>(cutouts: &HashMap<i32, MultiPolygon>, w: &mut W) -> io::Result<()> {
    (cutouts.len() as u64).minimally_serialize(w, ())?;
    for (tile, clip) in cutouts.iter() {
        tile.minimally_serialize(w, ())?;
        clip.minimally_serialize(w, ())?;
    }
    Ok(())
}

pub fn read_cutouts<R: Read>(r: &mut R) -> io::Result<HashMap<i32, MultiPolygon>> {
    let len = u64::deserialize_minimal(r, ())? as usize;
    let mut map = HashMap::with_capacity(len.min(1 << 16));
    for _ in 0..len {
        let tile = i32::deserialize_minimal(r, ())?;
        let clip = MultiPolygon::deserialize_minimal(r, ())?;
        map.insert(tile, clip);
    }
    Ok(map)
}
