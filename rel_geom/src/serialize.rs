//! Binary record layout for the cache/staging formats (spec.md §4.2, §6.4):
//! little-endian, fixed-width, `u64`-length-prefixed vectors.
//!
//! - `Box` = 4×`f64`
//! - `Point` = 2×`f64`
//! - `MultiPolygon` = `u64 numPolys`, each polygon = `u64 outerLen, outer
//!   points, u64 numInners, [u64 innerLen, inner points]...`

use std::io::{self, Read, Write};

use rel_storage::{DeserializeFromMinimal, SerializeMinimal};

use crate::{Coord, Envelope, LineString, MultiPolygon, Point, Polygon};

impl SerializeMinimal for Coord<f64> {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.x.minimally_serialize(w, ())?;
        self.y.minimally_serialize(w, ())
    }
}
impl DeserializeFromMinimal for Coord<f64> {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(Coord {
            x: f64::deserialize_minimal(r, ())?,
            y: f64::deserialize_minimal(r, ())?,
        })
    }
}

impl SerializeMinimal for Point<f64> {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.0.minimally_serialize(w, ())
    }
}
impl DeserializeFromMinimal for Point<f64> {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(Point(Coord::deserialize_minimal(r, ())?))
    }
}

impl SerializeMinimal for Envelope {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.min().x.minimally_serialize(w, ())?;
        self.min().y.minimally_serialize(w, ())?;
        self.max().x.minimally_serialize(w, ())?;
        self.max().y.minimally_serialize(w, ())
    }
}
impl DeserializeFromMinimal for Envelope {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        let x0 = f64::deserialize_minimal(r, ())?;
        let y0 = f64::deserialize_minimal(r, ())?;
        let x1 = f64::deserialize_minimal(r, ())?;
        let y1 = f64::deserialize_minimal(r, ())?;
        Ok(Envelope::new((x0, y0), (x1, y1)))
    }
}

fn write_ring<W: Write>(ring: &LineString<f64>, w: &mut W) -> io::Result<()> {
    (ring.0.len() as u64).minimally_serialize(w, ())?;
    for c in ring.0.iter() {
        c.minimally_serialize(w, ())?;
    }
    Ok(())
}

fn read_ring<R: Read>(r: &mut R) -> io::Result<LineString<f64>> {
    let len = u64::deserialize_minimal(r, ())? as usize;
    let mut coords = Vec::with_capacity(len.min(1 << 20));
    for _ in 0..len {
        coords.push(Coord::deserialize_minimal(r, ())?);
    }
    Ok(LineString::new(coords))
}

impl SerializeMinimal for LineString<f64> {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        write_ring(self, w)
    }
}
impl DeserializeFromMinimal for LineString<f64> {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        read_ring(r)
    }
}

impl SerializeMinimal for Polygon<f64> {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        write_ring(self.exterior(), w)?;
        (self.interiors().len() as u64).minimally_serialize(w, ())?;
        for inner in self.interiors() {
            write_ring(inner, w)?;
        }
        Ok(())
    }
}
impl DeserializeFromMinimal for Polygon<f64> {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        let outer = read_ring(r)?;
        let num_inner = u64::deserialize_minimal(r, ())? as usize;
        let mut inners = Vec::with_capacity(num_inner.min(1 << 16));
        for _ in 0..num_inner {
            inners.push(read_ring(r)?);
        }
        Ok(Polygon::new(outer, inners))
    }
}

impl SerializeMinimal for MultiPolygon {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        (self.0.len() as u64).minimally_serialize(w, ())?;
        for poly in self.0.iter() {
            poly.minimally_serialize(w, ())?;
        }
        Ok(())
    }
}
impl DeserializeFromMinimal for MultiPolygon {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        let num = u64::deserialize_minimal(r, ())? as usize;
        let mut polys = Vec::with_capacity(num.min(1 << 16));
        for _ in 0..num {
            polys.push(Polygon::deserialize_minimal(r, ())?);
        }
        Ok(MultiPolygon::new(polys))
    }
}
