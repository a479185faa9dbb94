//! Built-in UI dictionaries.
//!
//! English is the default locale and must define every key. The other
//! dictionaries may be partial; missing keys resolve through English.

use crate::i18n::LocaleCode;

/// Key/text pairs for one locale.
pub type Dictionary = &'static [(&'static str, &'static str)];

// ==================== English Strings ====================

/// English dictionary (default locale, complete)
pub const ENGLISH_STRINGS: Dictionary = &[
    // Navigation
    ("nav.dashboard", "Dashboard"),
    ("nav.students", "Students"),
    ("nav.courses", "Courses"),
    ("nav.schools", "Schools"),
    ("nav.reports", "Reports"),
    ("nav.settings", "Settings"),
    // Dashboard
    ("dashboard.title", "Learning Analytics"),
    ("dashboard.subtitle", "Progress across your classes at a glance"),
    ("dashboard.overview", "Overview"),
    ("dashboard.top_performers", "Top performers"),
    ("dashboard.needs_attention", "Needs attention"),
    // Metric labels
    ("metrics.average_score", "Average score"),
    ("metrics.attendance_rate", "Attendance rate"),
    ("metrics.completion_rate", "Completion rate"),
    ("metrics.engagement_minutes", "Weekly engagement (min)"),
    ("metrics.assignments_submitted", "Assignments submitted"),
    ("metrics.enrolled_students", "Enrolled students"),
    ("metrics.estimated", "Estimated"),
    // Entities
    ("student.profile", "Student profile"),
    ("student.name", "Name"),
    ("course.details", "Course details"),
    ("course.title", "Title"),
    ("course.description", "Description"),
    // Settings
    ("settings.language", "Language"),
    ("settings.language_changed", "Language updated"),
    // Common
    ("common.loading", "Loading…"),
    ("common.no_data", "No data available"),
    ("common.search", "Search"),
    ("common.export", "Export"),
    ("common.retry", "Try again"),
];

// ==================== Spanish Strings ====================

/// Spanish dictionary (partial)
pub const SPANISH_STRINGS: Dictionary = &[
    ("nav.dashboard", "Panel"),
    ("nav.students", "Estudiantes"),
    ("nav.courses", "Cursos"),
    ("nav.schools", "Escuelas"),
    ("nav.reports", "Informes"),
    ("nav.settings", "Configuración"),
    ("dashboard.title", "Analítica de Aprendizaje"),
    ("dashboard.subtitle", "El progreso de tus clases de un vistazo"),
    ("dashboard.overview", "Resumen"),
    ("dashboard.top_performers", "Mejores resultados"),
    ("metrics.average_score", "Puntuación media"),
    ("metrics.attendance_rate", "Tasa de asistencia"),
    ("metrics.completion_rate", "Tasa de finalización"),
    ("metrics.engagement_minutes", "Participación semanal (min)"),
    ("metrics.assignments_submitted", "Tareas entregadas"),
    ("metrics.enrolled_students", "Estudiantes inscritos"),
    ("metrics.estimated", "Estimado"),
    ("student.profile", "Perfil del estudiante"),
    ("student.name", "Nombre"),
    ("course.details", "Detalles del curso"),
    ("course.title", "Título"),
    ("settings.language", "Idioma"),
    ("settings.language_changed", "Idioma actualizado"),
    ("common.loading", "Cargando…"),
    ("common.no_data", "No hay datos disponibles"),
    ("common.search", "Buscar"),
];

// ==================== French Strings ====================

/// French dictionary (partial)
pub const FRENCH_STRINGS: Dictionary = &[
    ("nav.dashboard", "Tableau de bord"),
    ("nav.students", "Élèves"),
    ("nav.courses", "Cours"),
    ("nav.reports", "Rapports"),
    ("nav.settings", "Paramètres"),
    ("dashboard.title", "Analyse des apprentissages"),
    ("dashboard.overview", "Vue d'ensemble"),
    ("metrics.average_score", "Note moyenne"),
    ("metrics.attendance_rate", "Taux de présence"),
    ("metrics.completion_rate", "Taux d'achèvement"),
    ("metrics.estimated", "Estimé"),
    ("settings.language", "Langue"),
    ("common.loading", "Chargement…"),
    ("common.no_data", "Aucune donnée disponible"),
];

/// Built-in dictionary for a locale.
pub fn builtin_strings(locale: LocaleCode) -> Dictionary {
    match locale {
        LocaleCode::En => ENGLISH_STRINGS,
        LocaleCode::Es => SPANISH_STRINGS,
        LocaleCode::Fr => FRENCH_STRINGS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn keys(dictionary: Dictionary) -> HashSet<&'static str> {
        dictionary.iter().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_no_duplicate_keys() {
        for locale in LocaleCode::ALL {
            let dictionary = builtin_strings(locale);
            assert_eq!(
                keys(dictionary).len(),
                dictionary.len(),
                "duplicate key in {} dictionary",
                locale
            );
        }
    }

    #[test]
    fn test_default_dictionary_is_complete() {
        let english = keys(ENGLISH_STRINGS);
        for locale in LocaleCode::ALL {
            for key in keys(builtin_strings(locale)) {
                assert!(english.contains(key), "{} defines '{}' missing from English", locale, key);
            }
        }
    }

    #[test]
    fn test_no_empty_texts() {
        for locale in LocaleCode::ALL {
            for (key, text) in builtin_strings(locale) {
                assert!(!text.is_empty(), "{}:{} is empty", locale, key);
            }
        }
    }

    #[test]
    fn test_partial_dictionaries_are_partial() {
        assert!(SPANISH_STRINGS.len() < ENGLISH_STRINGS.len());
        assert!(FRENCH_STRINGS.len() < SPANISH_STRINGS.len());
    }
}
