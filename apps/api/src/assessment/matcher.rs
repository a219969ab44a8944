use std::collections::BTreeMap;

use crate::assessment::area::CompetencyArea;

/// Maps each competency area to course catalog positions.
///
/// Positions index the catalog ordered by course id. One instance lives in
/// `AppState` and is shared by submission and reporting code.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaCourseMap {
    positions: BTreeMap<CompetencyArea, Vec<usize>>,
}

impl AreaCourseMap {
    pub fn new(entries: impl IntoIterator<Item = (CompetencyArea, Vec<usize>)>) -> Self {
        Self {
            positions: entries.into_iter().collect(),
        }
    }

    /// Catalog positions recommended for an area. Unmapped areas get none.
    pub fn courses_for(&self, area: CompetencyArea) -> &[usize] {
        self.positions.get(&area).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Smallest catalog that satisfies every mapped position.
    pub fn required_catalog_size(&self) -> usize {
        self.positions
            .values()
            .flatten()
            .max()
            .map_or(0, |max| max + 1)
    }
}

impl Default for AreaCourseMap {
    fn default() -> Self {
        use CompetencyArea::*;
        Self::new([
            (GestionProyectos, vec![0]),
            (AnalisisRequerimientos, vec![1]),
            (CalidadTesting, vec![2]),
            (Seguridad, vec![3, 4]),
            (ArquitecturaDesarrollo, vec![5]),
            (CloudComputing, vec![6, 8]),
            (DevopsInfraestructura, vec![7, 8]),
            (InteligenciaArtificial, vec![3]),
        ])
    }
}
