//! Resource paths under the `/asodi/v1` prefix
//!
//! Every path keeps the trailing slash the backend router expects.

pub const AGREEMENTS: &str = "/convenios/";
pub const PATIENT_RECORDS: &str = "/planillas-convenio/";
pub const REQUESTS: &str = "/solicitudes/";
pub const ANNOUNCEMENTS: &str = "/anuncios/";
pub const AD_USERS: &str = "/usuarios-asodi-ad/";
pub const REGISTRY_PEOPLE: &str = "/usuarios/";

pub fn patient_record(id: i64) -> String {
    format!("{PATIENT_RECORDS}{id}/")
}

pub fn request(id: i64) -> String {
    format!("{REQUESTS}{id}/")
}

pub fn announcement(id: i64) -> String {
    format!("{ANNOUNCEMENTS}{id}/")
}

/// RUTs contain dots and dashes; the segment is percent-encoded anyway.
pub fn ad_user(rut: &str) -> String {
    format!("{AD_USERS}{}/", urlencoding::encode(rut.trim()))
}
