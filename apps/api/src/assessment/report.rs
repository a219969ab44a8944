use serde::Serialize;

use crate::assessment::aggregation::{aggregate_global, serialize_rounded, Averages};
use crate::assessment::area::CompetencyArea;
use crate::assessment::scoring::CompetencyRating;
use crate::models::assessment::AssessmentRow;
use crate::models::recommendation::RecommendationDetailRow;

const CRITICAL_GAP_MIN: i32 = 2;

/// Key metrics of a single assessment, used for the HR report.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub assessment_id: i64,
    pub averages: Option<Averages>,
    pub total_courses: usize,
    pub total_hours: i64,
    /// Areas with a gap of 2 or more.
    pub critical_areas: Vec<CompetencyArea>,
    /// Areas with no gap.
    pub strengths: Vec<CompetencyArea>,
    #[serde(serialize_with = "serialize_rounded")]
    pub estimated_investment: f64,
}

pub fn build_report(
    assessment: &AssessmentRow,
    recommendations: &[RecommendationDetailRow],
    hourly_cost: f64,
) -> AssessmentReport {
    let ratings: &[CompetencyRating] = &assessment.ratings;
    let total_hours: i64 = recommendations.iter().map(|r| r.hours).sum();

    AssessmentReport {
        assessment_id: assessment.id,
        averages: aggregate_global(&[ratings]),
        total_courses: recommendations.len(),
        total_hours,
        critical_areas: ratings
            .iter()
            .filter(|r| r.gap() >= CRITICAL_GAP_MIN)
            .map(|r| r.area)
            .collect(),
        strengths: ratings
            .iter()
            .filter(|r| r.gap() == 0)
            .map(|r| r.area)
            .collect(),
        estimated_investment: total_hours as f64 * hourly_cost,
    }
}

fn join_areas(areas: &[CompetencyArea]) -> String {
    if areas.is_empty() {
        return "Ninguna".to_string();
    }
    areas
        .iter()
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the report as plain text for HR.
pub fn render_report_text(
    assessment: &AssessmentRow,
    report: &AssessmentReport,
    recommendations: &[RecommendationDetailRow],
) -> String {
    let mut text = String::from("REPORTE DE EVALUACIÓN DE COMPETENCIAS TÉCNICAS\n\n");
    text.push_str(&format!("Empleado: {}\n", assessment.employee_name));
    text.push_str(&format!("Área: {}\n", assessment.department));
    text.push_str(&format!("Rol: {}\n", assessment.role));
    text.push_str(&format!("Experiencia: {}\n", assessment.experience));
    text.push_str(&format!("Fecha: {}\n\n", assessment.created_at.to_rfc3339()));

    text.push_str("Resumen Ejecutivo:\n");
    match &report.averages {
        Some(avg) => {
            text.push_str(&format!("- Nivel promedio: {:.2}\n", avg.level));
            text.push_str(&format!("- Gap promedio: {:.2}\n", avg.gap));
            text.push_str(&format!("- Interés promedio: {:.2}\n", avg.interest));
            text.push_str(&format!("- Relevancia promedio: {:.2}\n", avg.relevance));
        }
        None => text.push_str("- Sin competencias registradas\n"),
    }
    text.push_str(&format!(
        "- Total de cursos recomendados: {}\n",
        report.total_courses
    ));
    text.push_str(&format!(
        "- Horas estimadas de capacitación: {}\n\n",
        report.total_hours
    ));

    text.push_str(&format!("Áreas críticas: {}\n", join_areas(&report.critical_areas)));
    text.push_str(&format!("Fortalezas: {}\n\n", join_areas(&report.strengths)));

    text.push_str("Plan de implementación sugerido:\n");
    for rec in recommendations {
        text.push_str(&format!(
            "  - [{}] {} ({}h) - {}\n",
            rec.priority, rec.course_name, rec.hours, rec.justification
        ));
    }
    text.push('\n');

    text.push_str("Análisis de gaps por competencia:\n");
    for rating in assessment.ratings.iter() {
        text.push_str(&format!(
            "  - {}: Nivel actual {}, Gap {}, Interés {}, Relevancia {}\n",
            rating.area,
            rating.current_level,
            rating.gap(),
            rating.interest,
            rating.relevance
        ));
    }
    text.push('\n');

    text.push_str(&format!(
        "Estimación de inversión: ${:.0} COP\n",
        report.estimated_investment
    ));

    if let Some(notes) = assessment.manager_notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!("\nNotas del gestor: {notes}\n"));
    }
    text
}
