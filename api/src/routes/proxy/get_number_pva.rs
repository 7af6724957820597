//! onepva acquisition route

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use dg_core::domain::ResponseEnvelope;
use dg_core::services::UpstreamClient;

use super::{dispatch_provision, AppState};
use crate::dto::{first_message, PvaForm};
use crate::handlers::{EnvelopeExt, ProxyForm};

/// Handler for POST /api/proxy/getNumberPVA
///
/// All four form fields (`app`, `country`, `auth-token`, `code`) are required.
pub async fn get_number_pva<C: UpstreamClient + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<C>>,
    form: ProxyForm<PvaForm>,
) -> HttpResponse {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        let message = first_message(&errors, &PvaForm::FIELD_ORDER);
        return ResponseEnvelope::error(400, message).into_http_response();
    }

    dispatch_provision(&req, &state, form.into_request()).await
}
