//! Fixed lookup tables for the field detectors.
//!
//! These are process-wide constant configuration, tuned to one family of
//! certificate templates. Iteration order is meaningful: every detector
//! takes the first match in declared order, so ambiguous text resolves
//! deterministically.

use certikeeper_cert_models::{BaseCode, CourseLabel};

/// City-name substrings mapped to base codes, in tie-break order.
pub const BASE_CITIES: &[(&str, BaseCode)] = &[
    ("SAN ANDRES", BaseCode::Adz),
    ("BARRANQUILLA", BaseCode::Baq),
    ("BOGOTA", BaseCode::Bog),
    ("CALI", BaseCode::Clo),
    ("CARTAGENA", BaseCode::Ctg),
    ("MEDELLIN", BaseCode::Mde),
    ("PEREIRA", BaseCode::Pei),
    ("SANTA MARTA", BaseCode::Smr),
];

/// Course-name substrings mapped to canonical labels, in tie-break order.
///
/// Several templates phrase the same course differently, so a label may
/// have more than one key.
pub const COURSE_KEYS: &[(&str, CourseLabel)] = &[
    ("MERCANCIAS PELIGROSAS", CourseLabel::MercanciasPeligrosas),
    ("FACTORES HUMANOS", CourseLabel::FactoresHumanos),
    ("SEGURIDAD OPERACIONAL", CourseLabel::Sms),
    ("SMS", CourseLabel::Sms),
    ("SEGURIDAD EN RAMPA", CourseLabel::SeguridadRampa),
    ("SEGURIDAD DE RAMPA", CourseLabel::SeguridadRampa),
    ("CONDUCCION EN RAMPA", CourseLabel::ConduccionRampa),
    ("CONDUCCION DE EQUIPOS", CourseLabel::ConduccionRampa),
    ("FORMACION DE INSTRUCTORES", CourseLabel::FormacionInstructores),
    ("SERVICIO AL PASAJERO", CourseLabel::ServicioPasajero),
    ("ATENCION AL PASAJERO", CourseLabel::ServicioPasajero),
];

/// Keywords indicating a ground-operations (OT) trainee. Checked before
/// the SAP list.
pub const OT_KEYWORDS: &[&str] = &[
    "AGENTE DE RAMPA",
    "OPERACIONES TERRESTRES",
    "OPERADOR DE EQUIPOS",
    "CARGUE Y DESCARGUE",
    "RAMPA",
];

/// Keywords indicating a passenger-service (SAP) trainee.
pub const SAP_KEYWORDS: &[&str] = &[
    "SERVICIO AL PASAJERO",
    "ATENCION AL PASAJERO",
    "AGENTE DE TRAFICO",
    "AGENTE DE SERVICIO",
    "COUNTER",
    "PASAJEROS",
];

/// Tokens that never form part of a student's name: job titles, document
/// labels, and filler words that leak into the captured name run.
pub const NOISE_WORDS: &[&str] = &[
    "CARGO",
    "SUPERVISOR",
    "AGENTE",
    "AUXILIAR",
    "OPERADOR",
    "COORDINADOR",
    "INSTRUCTOR",
    "IDENTIFICACION",
    "CEDULA",
    "CIUDADANIA",
    "FIRMA",
    "SENOR",
    "SENORA",
    "DE",
    "DEL",
    "LA",
    "LOS",
];

#[cfg(test)]
mod tests {
    use certikeeper_cert_models::BaseCode;
    use strum::IntoEnumIterator as _;

    use super::*;

    #[test]
    fn every_known_base_has_a_city_key() {
        for base in BaseCode::iter().filter(|b| !b.is_unknown()) {
            assert!(
                BASE_CITIES.iter().any(|(_, code)| *code == base),
                "no city key for {base}"
            );
        }
    }

    #[test]
    fn tables_are_pre_normalized() {
        // Detector input is uppercase and accent-folded; keys must be too.
        let all_keys = BASE_CITIES
            .iter()
            .map(|(k, _)| *k)
            .chain(COURSE_KEYS.iter().map(|(k, _)| *k))
            .chain(OT_KEYWORDS.iter().copied())
            .chain(SAP_KEYWORDS.iter().copied())
            .chain(NOISE_WORDS.iter().copied());

        for key in all_keys {
            assert_eq!(key, certikeeper_pdf::normalize_text(key), "key: {key}");
        }
    }
}
