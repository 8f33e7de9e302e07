use std::io::{self, Read, Write};

use rel_boxid::{read_cutouts, write_cutouts, BoxIdList};
use rel_storage::{DeserializeFromMinimal, SerializeMinimal};

use crate::records::{AreaRecord, NodeRecord, WayRecord};

impl SerializeMinimal for AreaRecord {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.envelopes.minimally_serialize(w, ())?;
        self.id.minimally_serialize(w, ())?;
        self.obj_id.minimally_serialize(w, ())?;
        self.from_way.minimally_serialize(w, ())?;
        self.is_admin.minimally_serialize(w, ())?;
        self.geom.minimally_serialize(w, ())?;
        self.inner.minimally_serialize(w, ())?;
        self.outer.minimally_serialize(w, ())?;
        self.area.minimally_serialize(w, ())?;
        self.box_ids.minimally_serialize(w, ())?;
        write_cutouts(&self.cutouts, w)?;
        self.convex_hull.minimally_serialize(w, ())?;
        self.obb.minimally_serialize(w, ())
    }
}

impl DeserializeFromMinimal for AreaRecord {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(AreaRecord {
            envelopes: Vec::deserialize_minimal(r, ())?,
            id: u64::deserialize_minimal(r, ())?,
            obj_id: u64::deserialize_minimal(r, ())?,
            from_way: bool::deserialize_minimal(r, ())?,
            is_admin: bool::deserialize_minimal(r, ())?,
            geom: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            inner: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            outer: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            area: f64::deserialize_minimal(r, ())?,
            box_ids: BoxIdList::deserialize_minimal(r, ())?,
            cutouts: read_cutouts(r)?,
            convex_hull: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            obb: DeserializeFromMinimal::deserialize_minimal(r, ())?,
        })
    }
}

impl SerializeMinimal for WayRecord {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.envelope.minimally_serialize(w, ())?;
        self.id.minimally_serialize(w, ())?;
        self.geom.minimally_serialize(w, ())?;
        self.node_ids.minimally_serialize(w, ())?;
        self.sub_envelopes.minimally_serialize(w, ())?;
        self.box_ids.minimally_serialize(w, ())?;
        self.convex_hull.minimally_serialize(w, ())?;
        self.obb.minimally_serialize(w, ())
    }
}

impl DeserializeFromMinimal for WayRecord {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(WayRecord {
            envelope: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            id: u64::deserialize_minimal(r, ())?,
            geom: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            node_ids: Vec::deserialize_minimal(r, ())?,
            sub_envelopes: Vec::deserialize_minimal(r, ())?,
            box_ids: BoxIdList::deserialize_minimal(r, ())?,
            convex_hull: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            obb: DeserializeFromMinimal::deserialize_minimal(r, ())?,
        })
    }
}

impl SerializeMinimal for NodeRecord {
    type ExternalData<'s> = ();
    fn minimally_serialize<'a, 's: 'a, W: Write>(&'a self, w: &mut W, _: ()) -> io::Result<()> {
        self.envelope.minimally_serialize(w, ())?;
        self.id.minimally_serialize(w, ())?;
        self.geom.minimally_serialize(w, ())
    }
}

impl DeserializeFromMinimal for NodeRecord {
    type ExternalData<'d> = ();
    fn deserialize_minimal<'a, 'd: 'a, R: Read>(r: &'a mut R, _: ()) -> io::Result<Self> {
        Ok(NodeRecord {
            envelope: DeserializeFromMinimal::deserialize_minimal(r, ())?,
            id: u64::deserialize_minimal(r, ())?,
            geom: DeserializeFromMinimal::deserialize_minimal(r, ())?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::polygon;
    use rel_geom::{Envelope, MultiPolygon, Point, Polygon};
    use rel_storage::serialize_min::assert_roundtrip;
    use std::collections::HashMap;

    fn square() -> Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn node_record_roundtrip() {
        let rec = NodeRecord {
            envelope: Envelope::new((7.5, 48.0), (7.5, 48.0)),
            id: 42,
            geom: Point::new(7.5, 48.0),
        };
        assert_roundtrip(rec, (), ());
    }

    #[test]
    fn area_record_roundtrip_preserves_geometry() {
        let mp = MultiPolygon::new(vec![square()]);
        let rec = AreaRecord {
            envelopes: vec![Envelope::new((0.0, 0.0), (1.0, 1.0))],
            id: 1,
            obj_id: 11,
            from_way: true,
            is_admin: false,
            geom: mp.clone(),
            inner: MultiPolygon::new(vec![]),
            outer: mp.clone(),
            area: 123.0,
            box_ids: BoxIdList::new(),
            cutouts: HashMap::new(),
            convex_hull: square(),
            obb: square(),
        };

        assert_roundtrip(rec, (), ());
    }
}
