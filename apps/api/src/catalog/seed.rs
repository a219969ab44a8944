use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Default catalog: (name, hours, instructors), in area-mapping position order.
pub const DEFAULT_COURSES: &[(&str, i64, &str)] = &[
    (
        "Prácticas ágiles para la gerencia de proyectos",
        24,
        "Hugo Arboleda / Ingrid Muñoz",
    ),
    (
        "Levantamiento de requerimientos con seguridad",
        16,
        "Jose Luis Jurado / Lorena Jojoa",
    ),
    ("Técnicas de pruebas de software", 12, "Rocío Segovia Jiménez"),
    ("Seguridad en IA", 16, "Christian Urcuqui"),
    (
        "Fundamentos de protocolos de seguridad",
        12,
        "Juan Carlos Cuéllar",
    ),
    ("API Gateway", 16, "Leonardo Bustamante"),
    ("Serverless", 16, "Juan Carlos Muñoz"),
    (
        "Docker y Kubernetes",
        16,
        "Juan Jose Valencia y Domiciano Rincón",
    ),
    ("AWS: arquitectura, seguridad, redes", 24, "Gonzalo Llano R"),
];

/// Inserts the default courses when the catalog is empty. Returns how many were inserted.
pub async fn seed_default_courses(pool: &SqlitePool) -> Result<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Course catalog already has {existing} courses, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for &(name, hours, instructors) in DEFAULT_COURSES {
        sqlx::query("INSERT INTO courses (name, hours, instructors) VALUES (?, ?, ?)")
            .bind(name)
            .bind(hours)
            .bind(instructors)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    info!("Seeded {} default courses", DEFAULT_COURSES.len());
    Ok(DEFAULT_COURSES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::matcher::AreaCourseMap;
    use crate::catalog::fetch_catalog;
    use crate::db::test_pool;

    #[test]
    fn test_default_catalog_satisfies_area_mapping() {
        assert!(DEFAULT_COURSES.len() >= AreaCourseMap::default().required_catalog_size());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let pool = test_pool().await;
        assert_eq!(seed_default_courses(&pool).await.unwrap(), 9);
        assert_eq!(seed_default_courses(&pool).await.unwrap(), 0);

        let catalog = fetch_catalog(&pool).await.unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog[3].name, "Seguridad en IA");
        assert_eq!(catalog[8].hours, 24);
    }
}
