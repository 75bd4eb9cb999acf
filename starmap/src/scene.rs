use crate::bounds::Bounds;
use crate::layout::{LayoutEngine, PlacedEntity, SeedSource, Vec3};
use crate::model::{EntityId, EntityRecord};
use log::debug;

/// Everything produced by one dataset load, plus the fixed central body.
/// Built once; nothing in here changes afterwards.
pub struct StarMap {
    central: EntityRecord,
    central_size: f64,
    bounds: Bounds,
    entities: Vec<PlacedEntity>,
}

/// Where a pickable body sits in world space and how big it is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub position: Vec3,
    pub size: f64,
}

impl StarMap {
    pub fn build<S: SeedSource>(
        records: &[EntityRecord],
        engine: &mut LayoutEngine<S>,
        central_size: f64,
    ) -> Self {
        let bounds = Bounds::compute(records);
        debug!("bounds: {:?}", bounds);
        let entities = engine.place_all(records, &bounds);
        Self {
            central: EntityRecord::central_body(),
            central_size,
            bounds,
            entities,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn central(&self) -> &EntityRecord {
        &self.central
    }

    /// Dataset records in load order (the central body is not included).
    pub fn records(&self) -> impl Iterator<Item = &EntityRecord> + '_ {
        self.entities.iter().map(|e| &e.record)
    }

    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        match id {
            EntityId::Central => Some(&self.central),
            EntityId::Placed(i) => self.entities.get(i).map(|e| &e.record),
        }
    }

    pub fn body(&self, id: EntityId) -> Option<Body> {
        match id {
            EntityId::Central => Some(Body {
                id,
                position: Vec3::default(),
                size: self.central_size,
            }),
            EntityId::Placed(i) => self.entities.get(i).map(|e| Body {
                id,
                position: e.position,
                size: e.size,
            }),
        }
    }

    /// Central body first, then dataset entities in load order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        std::iter::once(EntityId::Central).chain((0..self.entities.len()).map(EntityId::Placed))
    }
}
