//! Typed operations on the backend resources

use asodi_domain::{
    AdUser, Agreement, Announcement, AnnouncementUpdate, ImageUpload, NewAnnouncement,
    NewPatient, NewRequest, PatientRecord, RegistryPerson, Request,
};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{info, instrument, warn};

use super::client::AsodiClient;
use super::endpoints;
use super::errors::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl AsodiClient {
    /* ----------------------------- agreements ----------------------------- */

    pub async fn list_agreements(&self) -> Result<Vec<Agreement>, ApiError> {
        self.get(endpoints::AGREEMENTS).await
    }

    /* --------------------------- patient records -------------------------- */

    pub async fn list_patient_records(&self) -> Result<Vec<PatientRecord>, ApiError> {
        self.get(endpoints::PATIENT_RECORDS).await
    }

    pub async fn get_patient_record(&self, id: i64) -> Result<PatientRecord, ApiError> {
        self.get(&endpoints::patient_record(id)).await
    }

    pub async fn create_patient_record(
        &self,
        patient: &NewPatient,
    ) -> Result<PatientRecord, ApiError> {
        let created: PatientRecord = self.post(endpoints::PATIENT_RECORDS, patient).await?;
        info!(patient_id = created.id, "Patient record created");
        Ok(created)
    }

    /// Full replacement of a record (PUT).
    pub async fn update_patient_record(
        &self,
        record: &PatientRecord,
    ) -> Result<PatientRecord, ApiError> {
        self.put(&endpoints::patient_record(record.id), record).await
    }

    /* ------------------------------ requests ------------------------------ */

    pub async fn list_requests(&self) -> Result<Vec<Request>, ApiError> {
        self.get(endpoints::REQUESTS).await
    }

    /// Requests filed by one staff account.
    ///
    /// The backend may ignore the query parameter, so the result is filtered
    /// again locally.
    pub async fn list_requests_by(&self, requested_by: &str) -> Result<Vec<Request>, ApiError> {
        let requests: Vec<Request> = self
            .get_with_query(endpoints::REQUESTS, &[("usuario_solicitante", requested_by)])
            .await?;
        Ok(requests.into_iter().filter(|r| r.requested_by == requested_by).collect())
    }

    pub async fn create_request(&self, request: &NewRequest) -> Result<Request, ApiError> {
        self.post(endpoints::REQUESTS, request).await
    }

    pub async fn update_request(&self, request: &Request) -> Result<Request, ApiError> {
        self.put(&endpoints::request(request.id), request).await
    }

    /* ---------------------------- announcements --------------------------- */

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>, ApiError> {
        self.get(endpoints::ANNOUNCEMENTS).await
    }

    /// Publish an announcement as a multipart form with optional image.
    #[instrument(skip(self, announcement), fields(title = %announcement.title))]
    pub async fn create_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, ApiError> {
        let form = Form::new()
            .text("usuario_asodi_admin", announcement.published_by.clone())
            .text("titulo", announcement.title.clone())
            .text("descripcion", announcement.description.clone())
            .text("fecha_inicio", announcement.starts_on.format(DATE_FORMAT).to_string())
            .text("fecha_termino", announcement.ends_on.format(DATE_FORMAT).to_string())
            .text("estado_an", announcement.active.to_string());
        let form = attach_image(form, announcement.image.as_ref())?;

        self.send_multipart(Method::POST, endpoints::ANNOUNCEMENTS, form).await
    }

    /// Partial update; sent as multipart when a new image is attached.
    pub async fn patch_announcement(
        &self,
        id: i64,
        update: &AnnouncementUpdate,
        image: Option<&ImageUpload>,
    ) -> Result<Announcement, ApiError> {
        let path = endpoints::announcement(id);
        if image.is_none() {
            return self.patch(&path, update).await;
        }

        let mut form = Form::new();
        if let Some(title) = &update.title {
            form = form.text("titulo", title.clone());
        }
        if let Some(description) = &update.description {
            form = form.text("descripcion", description.clone());
        }
        if let Some(starts_on) = update.starts_on {
            form = form.text("fecha_inicio", starts_on.format(DATE_FORMAT).to_string());
        }
        if let Some(ends_on) = update.ends_on {
            form = form.text("fecha_termino", ends_on.format(DATE_FORMAT).to_string());
        }
        if let Some(active) = update.active {
            form = form.text("estado_an", active.to_string());
        }
        let form = attach_image(form, image)?;

        self.send_multipart(Method::PATCH, &path, form).await
    }

    pub async fn delete_announcement(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::announcement(id)).await
    }

    /* ------------------------------ AD users ------------------------------ */

    pub async fn list_ad_users(&self) -> Result<Vec<AdUser>, ApiError> {
        self.get(endpoints::AD_USERS).await
    }

    pub async fn get_ad_user(&self, rut: &str) -> Result<AdUser, ApiError> {
        self.get(&endpoints::ad_user(rut)).await
    }

    pub async fn create_ad_user(&self, user: &AdUser) -> Result<AdUser, ApiError> {
        self.post(endpoints::AD_USERS, user).await
    }

    pub async fn update_ad_user(&self, user: &AdUser) -> Result<AdUser, ApiError> {
        self.put(&endpoints::ad_user(&user.rut), user).await
    }

    /// Log in against the AD user list.
    ///
    /// The backend has no login endpoint: the list is fetched and matched on
    /// e-mail and password. Inactive accounts are refused.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AdUser, ApiError> {
        let users = self.list_ad_users().await?;
        let Some(user) = users.into_iter().find(|user| user.matches_credentials(email, password))
        else {
            warn!("Login rejected: unknown e-mail or wrong password");
            return Err(ApiError::Auth("invalid credentials".into()));
        };

        if !user.active {
            warn!(rut = %user.rut, "Login rejected: account disabled");
            return Err(ApiError::Auth("account disabled".into()));
        }

        info!(rut = %user.rut, "Login accepted");
        Ok(user)
    }

    /* --------------------------- people registry -------------------------- */

    pub async fn list_registry_people(&self) -> Result<Vec<RegistryPerson>, ApiError> {
        self.get(endpoints::REGISTRY_PEOPLE).await
    }

    /// Registry entry with exactly this RUT, used to prefill patient names.
    pub async fn find_by_rut(&self, rut: &str) -> Result<Option<RegistryPerson>, ApiError> {
        let people = self.list_registry_people().await?;
        Ok(people.into_iter().find(|person| person.rut == rut))
    }
}

fn attach_image(form: Form, image: Option<&ImageUpload>) -> Result<Form, ApiError> {
    let Some(image) = image else {
        return Ok(form);
    };
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime_type)
        .map_err(|e| ApiError::Client(format!("Invalid image MIME type {}: {e}", image.mime_type)))?;
    Ok(form.part("imagen", part))
}
