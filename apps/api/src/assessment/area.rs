use serde::{Deserialize, Serialize};

/// The fixed set of competency areas every assessment rates.
///
/// Ratings carry their area explicitly, so nothing downstream depends on the
/// order in which a client submitted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetencyArea {
    #[serde(alias = "Gestión de Proyectos")]
    GestionProyectos,
    #[serde(alias = "Análisis y Requerimientos")]
    AnalisisRequerimientos,
    #[serde(alias = "Calidad y Testing")]
    CalidadTesting,
    #[serde(alias = "Seguridad")]
    Seguridad,
    #[serde(alias = "Arquitectura y Desarrollo")]
    ArquitecturaDesarrollo,
    #[serde(alias = "Cloud Computing")]
    CloudComputing,
    #[serde(alias = "DevOps e Infraestructura")]
    DevopsInfraestructura,
    #[serde(alias = "Inteligencia Artificial")]
    InteligenciaArtificial,
}

impl CompetencyArea {
    /// All areas in dashboard display order.
    pub const ALL: [CompetencyArea; 8] = [
        CompetencyArea::GestionProyectos,
        CompetencyArea::AnalisisRequerimientos,
        CompetencyArea::CalidadTesting,
        CompetencyArea::Seguridad,
        CompetencyArea::ArquitecturaDesarrollo,
        CompetencyArea::CloudComputing,
        CompetencyArea::DevopsInfraestructura,
        CompetencyArea::InteligenciaArtificial,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn label(self) -> &'static str {
        match self {
            CompetencyArea::GestionProyectos => "Gestión de Proyectos",
            CompetencyArea::AnalisisRequerimientos => "Análisis y Requerimientos",
            CompetencyArea::CalidadTesting => "Calidad y Testing",
            CompetencyArea::Seguridad => "Seguridad",
            CompetencyArea::ArquitecturaDesarrollo => "Arquitectura y Desarrollo",
            CompetencyArea::CloudComputing => "Cloud Computing",
            CompetencyArea::DevopsInfraestructura => "DevOps e Infraestructura",
            CompetencyArea::InteligenciaArtificial => "Inteligencia Artificial",
        }
    }
}

impl std::fmt::Display for CompetencyArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_areas_are_distinct() {
        let mut areas = CompetencyArea::ALL.to_vec();
        areas.sort();
        areas.dedup();
        assert_eq!(areas.len(), CompetencyArea::COUNT);
    }

    #[test]
    fn test_serializes_as_snake_case_id() {
        let json = serde_json::to_string(&CompetencyArea::DevopsInfraestructura).unwrap();
        assert_eq!(json, "\"devops_infraestructura\"");
    }

    #[test]
    fn test_accepts_display_label() {
        let area: CompetencyArea = serde_json::from_str("\"Gestión de Proyectos\"").unwrap();
        assert_eq!(area, CompetencyArea::GestionProyectos);
        let area: CompetencyArea = serde_json::from_str("\"cloud_computing\"").unwrap();
        assert_eq!(area, CompetencyArea::CloudComputing);
    }

    #[test]
    fn test_unknown_area_is_rejected() {
        assert!(serde_json::from_str::<CompetencyArea>("\"Marketing\"").is_err());
    }
}
